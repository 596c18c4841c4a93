use crate::grading::policy::GradeScale;

impl GradeScale {
    /// Returns the letter of the first band whose lower bound is `<= score`,
    /// or the floor letter. NaN falls through to the floor.
    ///
    /// With the default bands:
    ///
    /// | Range       | Grade |
    /// |-------------|-------|
    /// | >= 85       | A     |
    /// | >= 70       | B     |
    /// | >= 55       | C     |
    /// | >= 40       | D     |
    /// | < 40        | E     |
    ///
    /// Scores outside `[0, 100]` land in the nearest end band.
    pub fn classify(&self, score: f64) -> &str {
        self.bands
            .iter()
            .find(|band| score >= band.min)
            .map(|band| band.letter.as_str())
            .unwrap_or(self.floor.as_str())
    }

    /// Band index for `score`: 0 is the best band, `bands.len()` is the floor.
    pub fn rank(&self, score: f64) -> usize {
        self.bands
            .iter()
            .position(|band| score >= band.min)
            .unwrap_or(self.bands.len())
    }
}
