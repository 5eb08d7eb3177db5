use crate::geometry::PageGeometry;
use crate::LayoutError;

/// Page budget for one export, computed once before any drawing.
///
/// The table header row is charged against the first page: page 1 holds
/// `rows_per_page - 1` records and every later page holds `rows_per_page`.
/// Under that rule `total_pages == ceil((records + 1) / rows_per_page)` for
/// every record count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    rows_per_page: usize,
    record_count: usize,
    total_pages: usize,
}

impl PagePlan {
    pub fn new(rows_per_page: usize, record_count: usize) -> Result<Self, LayoutError> {
        if rows_per_page == 0 {
            return Err(LayoutError::DegenerateGeometry(
                "rows_per_page must be at least 1".to_string(),
            ));
        }
        let total_pages = (record_count + 1).div_ceil(rows_per_page);
        log::debug!(
            "Planned {} page(s) for {} record(s) at {} rows per page",
            total_pages,
            record_count,
            rows_per_page
        );
        Ok(Self {
            rows_per_page,
            record_count,
            total_pages,
        })
    }

    /// Validates `geometry` and plans `record_count` rows on it.
    pub fn for_geometry(geometry: &PageGeometry, record_count: usize) -> Result<Self, LayoutError> {
        Self::new(geometry.validate()?, record_count)
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn expected_breaks(&self) -> usize {
        self.total_pages - 1
    }

    /// Data rows page `page` (1-based) may hold.
    pub fn capacity(&self, page: usize) -> usize {
        match page {
            0 => 0,
            1 => self.rows_per_page - 1,
            _ => self.rows_per_page,
        }
    }

    /// Data rows that actually land on `page` (1-based).
    pub fn rows_on_page(&self, page: usize) -> usize {
        if page == 0 || page > self.total_pages {
            return 0;
        }
        let before: usize = (1..page).map(|p| self.capacity(p)).sum();
        self.record_count
            .saturating_sub(before)
            .min(self.capacity(page))
    }

    /// Fails unless exactly `total_pages` pages were produced.
    pub fn verify(&self, produced: usize) -> Result<(), LayoutError> {
        if produced == self.total_pages {
            Ok(())
        } else {
            Err(LayoutError::PlanMismatch {
                expected: self.total_pages,
                produced,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_matches_formula_for_every_small_n() {
        for rows_per_page in 1..=8 {
            for n in 0..=40 {
                let plan = PagePlan::new(rows_per_page, n).unwrap();
                assert_eq!(plan.total_pages(), (n + 1).div_ceil(rows_per_page));

                let placed: usize = (1..=plan.total_pages()).map(|p| plan.rows_on_page(p)).sum();
                assert_eq!(placed, n, "rpp {} n {}", rows_per_page, n);
                // the last page is never empty unless the whole export is
                if n > 0 {
                    assert!(plan.rows_on_page(plan.total_pages()) > 0);
                }
            }
        }
    }

    #[test]
    fn zero_records_is_one_page() {
        let plan = PagePlan::new(6, 0).unwrap();
        assert_eq!(plan.total_pages(), 1);
        assert_eq!(plan.expected_breaks(), 0);
        assert_eq!(plan.rows_on_page(1), 0);
    }

    #[test]
    fn header_row_is_charged_to_the_first_page() {
        let plan = PagePlan::new(6, 5).unwrap();
        assert_eq!(plan.total_pages(), 1);

        let plan = PagePlan::new(6, 6).unwrap();
        assert_eq!(plan.total_pages(), 2);
        assert_eq!(plan.rows_on_page(1), 5);
        assert_eq!(plan.rows_on_page(2), 1);

        let plan = PagePlan::new(6, 7).unwrap();
        assert_eq!(plan.total_pages(), 2);
        assert_eq!(plan.rows_on_page(2), 2);
    }

    #[test]
    fn single_row_plan_gives_the_first_page_no_capacity() {
        let plan = PagePlan::new(1, 2).unwrap();
        assert_eq!(plan.capacity(1), 0);
        assert_eq!(plan.total_pages(), 3);
        assert_eq!(plan.rows_on_page(1), 0);
        assert_eq!(plan.rows_on_page(3), 1);
    }

    #[test]
    fn zero_rows_per_page_is_rejected() {
        assert!(matches!(
            PagePlan::new(0, 3),
            Err(LayoutError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn verify_reports_mismatch() {
        let plan = PagePlan::new(6, 12).unwrap();
        assert_eq!(plan.total_pages(), 3);
        assert!(plan.verify(3).is_ok());
        assert_eq!(
            plan.verify(2),
            Err(LayoutError::PlanMismatch {
                expected: 3,
                produced: 2
            })
        );
    }

    #[test]
    fn plans_from_default_geometry() {
        let plan = PagePlan::for_geometry(&PageGeometry::default(), 30).unwrap();
        assert_eq!(plan.rows_per_page(), 6);
        assert_eq!(plan.total_pages(), 6);
    }
}
