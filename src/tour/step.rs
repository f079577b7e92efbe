//! Step data model and tour definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::selector::Selector;

/// One unit of a guided walkthrough, bound to a target element and
/// instructional content. Steps are immutable once the tour is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Selector identifying the element to highlight
    pub target: Selector,
    /// Optional tooltip title
    #[serde(default)]
    pub title: Option<String>,
    /// Instructional text shown in the tooltip
    pub content: String,
    /// Presentation flags
    #[serde(default)]
    pub flags: BehaviorFlags,
    /// Navigation required before the next step's target becomes available
    #[serde(default)]
    pub transition: Option<StepTransition>,
}

impl Step {
    /// Whether advancing past this step requires the user to click inside
    /// the target, rather than pressing Next.
    pub fn click_required(&self) -> bool {
        self.transition.as_ref().is_some_and(|t| t.click_required)
    }
}

/// Presentation flags controlling how a step is rendered.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BehaviorFlags {
    /// Skip the intro beacon and show the tooltip immediately
    #[serde(default)]
    pub disable_beacon: bool,
    /// Hide the tooltip footer (Next/progress hints)
    #[serde(default)]
    pub hide_footer: bool,
    /// Hide the close hint
    #[serde(default)]
    pub hide_close_button: bool,
    /// Don't end the tour when the overlay outside the target is clicked
    #[serde(default)]
    pub disable_overlay_close: bool,
    /// Hide the back hint
    #[serde(default)]
    pub hide_back_button: bool,
}

/// A step's declared navigation: leaving the step routes the application to
/// `base_path + route` before the next step's target is located.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepTransition {
    /// Route segment appended to the application base path
    pub route: String,
    /// Require a click inside the target before advancing
    #[serde(default)]
    pub click_required: bool,
}

/// A named, ordered, fixed sequence of steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourDefinition {
    #[serde(default)]
    pub name: Option<String>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Error)]
pub enum TourDefinitionError {
    #[error("invalid tour definition: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tour definition has no steps")]
    NoSteps,
}

impl TourDefinition {
    /// Parse and validate a tour definition from JSON.
    pub fn from_json(json: &str) -> Result<Self, TourDefinitionError> {
        let def: TourDefinition = serde_json::from_str(json)?;
        if def.steps.is_empty() {
            return Err(TourDefinitionError::NoSteps);
        }
        Ok(def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_from_json() {
        let def = TourDefinition::from_json(
            r##"{
                "name": "onboarding",
                "steps": [
                    {
                        "target": "[data-action=\"add-patient\"]",
                        "title": "Create a patient!",
                        "content": "Click here to add a patient",
                        "flags": { "disable_beacon": true, "hide_footer": true },
                        "transition": { "route": "patient-registration", "click_required": true }
                    },
                    {
                        "target": "#demographics",
                        "content": "Fill the details and click on save"
                    }
                ]
            }"##,
        )
        .unwrap();

        assert_eq!(def.name.as_deref(), Some("onboarding"));
        assert_eq!(def.steps.len(), 2);
        assert!(def.steps[0].click_required());
        assert!(def.steps[0].flags.hide_footer);
        assert!(!def.steps[1].click_required());
        assert_eq!(
            def.steps[1].target,
            Selector::Id("demographics".to_string())
        );
    }

    #[test]
    fn test_definition_rejects_empty_steps() {
        assert!(matches!(
            TourDefinition::from_json(r#"{ "steps": [] }"#),
            Err(TourDefinitionError::NoSteps)
        ));
    }

    #[test]
    fn test_definition_rejects_bad_selector() {
        let result = TourDefinition::from_json(
            r#"{ "steps": [ { "target": "[broken", "content": "x" } ] }"#,
        );
        assert!(matches!(result, Err(TourDefinitionError::Parse(_))));
    }

    #[test]
    fn test_definition_rejects_unknown_flags() {
        let result = TourDefinition::from_json(
            r##"{ "steps": [ { "target": "#a", "content": "x", "flags": { "sparkle": true } } ] }"##,
        );
        assert!(matches!(result, Err(TourDefinitionError::Parse(_))));
    }

    #[test]
    fn test_click_required_defaults_false() {
        let def = TourDefinition::from_json(
            r##"{ "steps": [ { "target": "#a", "content": "x", "transition": { "route": "b" } } ] }"##,
        )
        .unwrap();
        assert!(!def.steps[0].click_required());
    }
}
