//! Placement test list: level ordering, filter pills, search, paging

use super::pager::{Pager, TEST_PAGE_SIZE};
use crate::domain::{Level, QuestionMode, Test};

/// Mode pill above the test list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeFilter {
    #[default]
    All,
    Single,
    Fill,
    Mixed,
    /// B1/B2 tests that are not pure fill-in
    Exam,
}

impl ModeFilter {
    pub fn all() -> &'static [ModeFilter] {
        &[
            ModeFilter::All,
            ModeFilter::Single,
            ModeFilter::Fill,
            ModeFilter::Mixed,
            ModeFilter::Exam,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModeFilter::All => "All",
            ModeFilter::Single => "Multiple choice",
            ModeFilter::Fill => "Fill in",
            ModeFilter::Mixed => "Mixed",
            ModeFilter::Exam => "Exam",
        }
    }

    pub fn matches(&self, test: &Test) -> bool {
        match self {
            ModeFilter::All => true,
            ModeFilter::Single => test.question_mode == QuestionMode::Single,
            ModeFilter::Fill => test.question_mode == QuestionMode::Fill,
            ModeFilter::Mixed => test.question_mode == QuestionMode::Mixed,
            ModeFilter::Exam => {
                test.level.is_exam_level() && test.question_mode != QuestionMode::Fill
            }
        }
    }
}

impl std::str::FromStr for ModeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ModeFilter::All),
            "single" => Ok(ModeFilter::Single),
            "fill" => Ok(ModeFilter::Fill),
            "mixed" => Ok(ModeFilter::Mixed),
            "exam" => Ok(ModeFilter::Exam),
            other => Err(format!(
                "Unknown mode: {}. Use: all, single, fill, mixed, exam",
                other
            )),
        }
    }
}

/// Filter state of the test list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestFilter {
    /// `None` means all levels
    pub level: Option<Level>,
    pub mode: ModeFilter,
    pub search: String,
}

impl TestFilter {
    pub fn matches(&self, test: &Test) -> bool {
        if let Some(level) = self.level {
            if test.level != level {
                return false;
            }
        }
        if !self.mode.matches(test) {
            return false;
        }

        let term = self.search.trim().to_lowercase();
        term.is_empty()
            || test.title.to_lowercase().contains(&term)
            || test.description.to_lowercase().contains(&term)
            || test.slug.to_lowercase().contains(&term)
    }

    pub fn apply<'a>(&self, tests: &'a [Test]) -> Vec<&'a Test> {
        tests.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Sort tests A1 → B2, keeping the server order within a level
pub fn sort_by_level(tests: &mut [Test]) {
    tests.sort_by_key(|t| t.level.rank());
}

/// Test list with its filter and pager; every filter change returns to the
/// first page.
#[derive(Debug, Clone)]
pub struct TestBoard {
    tests: Vec<Test>,
    filter: TestFilter,
    pager: Pager,
}

impl Default for TestBoard {
    fn default() -> Self {
        Self {
            tests: Vec::new(),
            filter: TestFilter::default(),
            pager: Pager::new(TEST_PAGE_SIZE),
        }
    }
}

impl TestBoard {
    pub fn new(mut tests: Vec<Test>) -> Self {
        sort_by_level(&mut tests);
        Self {
            tests,
            ..Self::default()
        }
    }

    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    pub fn filter(&self) -> &TestFilter {
        &self.filter
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn set_tests(&mut self, mut tests: Vec<Test>) {
        sort_by_level(&mut tests);
        self.tests = tests;
    }

    pub fn set_level(&mut self, level: Option<Level>) {
        self.filter.level = level;
        self.pager.reset();
    }

    pub fn set_mode(&mut self, mode: ModeFilter) {
        self.filter.mode = mode;
        self.pager.reset();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.pager.reset();
    }

    pub fn reset_pager(&mut self) {
        self.pager.reset();
    }

    pub fn filtered(&self) -> Vec<&Test> {
        self.filter.apply(&self.tests)
    }

    pub fn visible(&self) -> Vec<&Test> {
        let filtered = self.filtered();
        let shown = self.pager.shown(filtered.len());
        filtered.into_iter().take(shown).collect()
    }

    pub fn load_more(&mut self) {
        let total = self.filtered().len();
        self.pager.load_more(total);
    }

    pub fn has_more(&self) -> bool {
        self.pager.has_more(self.filtered().len())
    }

    pub fn status(&self) -> String {
        self.pager.status(self.filtered().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Stream;

    fn test(slug: &str, level: Level, mode: QuestionMode) -> Test {
        Test {
            id: 0,
            title: format!("Test {}", slug),
            slug: slug.to_string(),
            description: String::new(),
            level,
            stream: Stream::Bokmaal,
            estimated_minutes: 10,
            question_count: 5,
            question_mode: mode,
            is_restricted: false,
        }
    }

    fn sample() -> Vec<Test> {
        vec![
            test("b2-exam", Level::B2, QuestionMode::Mixed),
            test("a1-words", Level::A1, QuestionMode::Single),
            test("b1-gaps", Level::B1, QuestionMode::Fill),
            test("a2-grammar", Level::A2, QuestionMode::Fill),
            test("b1-reading", Level::B1, QuestionMode::Single),
        ]
    }

    fn slugs(tests: &[&Test]) -> Vec<String> {
        tests.iter().map(|t| t.slug.clone()).collect()
    }

    #[test]
    fn test_sorted_by_level() {
        let board = TestBoard::new(sample());
        let levels: Vec<Level> = board.tests().iter().map(|t| t.level).collect();
        assert_eq!(
            levels,
            vec![Level::A1, Level::A2, Level::B1, Level::B1, Level::B2]
        );
        // Stable within a level
        assert_eq!(board.tests()[2].slug, "b1-gaps");
    }

    #[test]
    fn test_exam_filter() {
        let filter = TestFilter {
            mode: ModeFilter::Exam,
            ..Default::default()
        };
        let tests = sample();
        assert_eq!(
            slugs(&filter.apply(&tests)),
            vec!["b2-exam".to_string(), "b1-reading".to_string()]
        );
    }

    #[test]
    fn test_level_and_mode_combined() {
        let filter = TestFilter {
            level: Some(Level::B1),
            mode: ModeFilter::Fill,
            search: String::new(),
        };
        let tests = sample();
        assert_eq!(slugs(&filter.apply(&tests)), vec!["b1-gaps".to_string()]);
    }

    #[test]
    fn test_search_matches_title_description_and_slug() {
        let mut tests = sample();
        tests[1].description = "Hverdagsord og HILSENER".to_string();

        let filter = TestFilter {
            search: "  hilsener ".to_string(),
            ..Default::default()
        };
        assert_eq!(slugs(&filter.apply(&tests)), vec!["a1-words".to_string()]);

        let filter = TestFilter {
            search: "GRAMMAR".to_string(),
            ..Default::default()
        };
        assert_eq!(slugs(&filter.apply(&tests)), vec!["a2-grammar".to_string()]);
    }

    #[test]
    fn test_filter_change_resets_pager() {
        let tests: Vec<Test> = (0..30)
            .map(|i| test(&format!("t{}", i), Level::A1, QuestionMode::Single))
            .collect();
        let mut board = TestBoard::new(tests);

        board.load_more();
        assert_eq!(board.visible().len(), 24);

        board.set_search("t");
        assert_eq!(board.visible().len(), 12);
        assert_eq!(board.status(), "Showing 12 of 30");
        assert!(board.has_more());
    }

    #[test]
    fn test_mode_filter_parse() {
        assert_eq!("Exam".parse::<ModeFilter>().unwrap(), ModeFilter::Exam);
        assert!("essay".parse::<ModeFilter>().is_err());
    }
}
