//! Linear six-step wizard over the record sections.
//!
//! Navigation is index-based over [`SectionKey::ALL`]: `next` and
//! `previous` clamp at the ends, and `jump_to` is allowed unconditionally
//! because the step indicator permits direct navigation. Completion is
//! advisory (progress coloring) and never gates a transition. There is no
//! terminal state; preview mode is a separate flag on the editor session.

use shared::{BiodataData, SectionKey, StepProgress, WizardProgressResponse};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    current: SectionKey,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    /// Start at the first declared section
    pub fn new() -> Self {
        Self { current: SectionKey::ALL[0] }
    }

    pub fn current(&self) -> SectionKey {
        self.current
    }

    pub fn index(&self) -> usize {
        self.current.index()
    }

    pub fn is_first(&self) -> bool {
        self.index() == 0
    }

    pub fn is_last(&self) -> bool {
        self.index() == SectionKey::ALL.len() - 1
    }

    /// Advance one step. Returns whether the position moved.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current = SectionKey::ALL[self.index() + 1];
        true
    }

    /// Go back one step. Returns whether the position moved.
    pub fn previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current = SectionKey::ALL[self.index() - 1];
        true
    }

    /// Direct navigation to any declared step, regardless of completion
    pub fn jump_to(&mut self, step: SectionKey) {
        self.current = step;
    }

    /// Per-step required-field completion for the given record
    pub fn progress(&self, record: &BiodataData) -> WizardProgressResponse {
        let steps = SectionKey::ALL
            .iter()
            .map(|&step| {
                let section = record.section_progress(step);
                StepProgress {
                    step,
                    label: step.label().to_string(),
                    completed: section.completed,
                    total: section.total,
                    percent: section.percent(),
                }
            })
            .collect();

        WizardProgressResponse { current_step: self.current, steps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_initial_state_is_first_section() {
        let wizard = WizardState::new();
        assert_eq!(wizard.current(), SectionKey::Personal);
        assert!(wizard.is_first());
        assert!(!wizard.is_last());
    }

    #[test]
    fn test_next_walks_declared_order() {
        let mut wizard = WizardState::new();
        let expected = [
            SectionKey::Education,
            SectionKey::Family,
            SectionKey::Lifestyle,
            SectionKey::Horoscope,
            SectionKey::Contact,
        ];
        for step in expected {
            assert!(wizard.next());
            assert_eq!(wizard.current(), step);
        }
    }

    #[test]
    fn test_next_clamps_at_last() {
        let mut wizard = WizardState::new();
        wizard.jump_to(SectionKey::Contact);
        assert!(wizard.is_last());
        assert!(!wizard.next());
        assert_eq!(wizard.current(), SectionKey::Contact);
    }

    #[test]
    fn test_previous_clamps_at_first() {
        let mut wizard = WizardState::new();
        assert!(!wizard.previous());
        assert_eq!(wizard.current(), SectionKey::Personal);
    }

    #[test]
    fn test_index_never_leaves_bounds() {
        let mut wizard = WizardState::new();
        for _ in 0..10 {
            wizard.next();
            assert!(wizard.index() < SectionKey::ALL.len());
        }
        for _ in 0..10 {
            wizard.previous();
            assert!(wizard.index() < SectionKey::ALL.len());
        }
        assert_eq!(wizard.index(), 0);
    }

    #[test]
    fn test_jump_to_ignores_completion() {
        // the record is entirely empty; jumping ahead is still allowed
        let mut wizard = WizardState::new();
        wizard.jump_to(SectionKey::Horoscope);
        assert_eq!(wizard.current(), SectionKey::Horoscope);
        wizard.jump_to(SectionKey::Personal);
        assert_eq!(wizard.current(), SectionKey::Personal);
    }

    #[test]
    fn test_progress_reports_all_steps() {
        let mut record = BiodataData::default();
        record
            .merge_section(
                SectionKey::Family,
                &json!({ "fatherName": "Ram", "motherName": "Sita" }),
                NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
            )
            .unwrap();

        let wizard = WizardState::new();
        let progress = wizard.progress(&record);
        assert_eq!(progress.current_step, SectionKey::Personal);
        assert_eq!(progress.steps.len(), 6);

        let family = &progress.steps[SectionKey::Family.index()];
        assert_eq!(family.completed, 2);
        assert_eq!(family.total, 2);
        assert_eq!(family.percent, 100);

        let personal = &progress.steps[0];
        assert_eq!(personal.completed, 0);
        assert_eq!(personal.label, "Personal Details");
    }
}
