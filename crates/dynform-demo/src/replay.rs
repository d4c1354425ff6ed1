//! Script replay against a store
//!
//! Stands in for the field renderer: every action is one forwarded user
//! interaction, and the live preview is printed the way the form shows it.

use anyhow::{Context, Result};
use dynform_core::{
    ActionOutcome, ActionScript, CollectionKind, FormAction, FormStore, LivePreview,
};
use std::io::Write;

/// How to run a script
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ReplayOptions {
    /// Abort at the first rejected action
    pub(crate) stop_on_error: bool,
    /// Print the preview after every action, not only at the end
    pub(crate) each: bool,
}

/// Summary of a replay
#[derive(Debug, Default)]
pub(crate) struct ReplayReport {
    pub(crate) applied: usize,
    /// (action index, error message)
    pub(crate) rejected: Vec<(usize, String)>,
    pub(crate) preview: String,
}

/// Apply `script` to `store`, writing progress and previews to `out`
pub(crate) fn replay(
    store: &mut FormStore,
    script: &ActionScript,
    options: ReplayOptions,
    out: &mut impl Write,
) -> Result<ReplayReport> {
    let preview = LivePreview::attach(store).context("failed to render initial preview")?;
    let mut report = ReplayReport::default();

    for (step, action) in script.actions.iter().enumerate() {
        match store.apply(action) {
            Ok(outcome) => {
                report.applied += 1;
                writeln!(out, "[{step}] {} -> {}", describe(action), describe_outcome(outcome))?;
            }
            Err(err) => {
                tracing::warn!(step, error = %err, "action rejected");
                writeln!(out, "[{step}] {} -> rejected: {err}", describe(action))?;
                report.rejected.push((step, err.to_string()));
                if options.stop_on_error {
                    break;
                }
            }
        }
        if options.each {
            writeln!(out, "{}", preview.text())?;
        }
    }

    report.preview = preview.text();
    if !options.each {
        writeln!(out, "{}", report.preview)?;
    }
    Ok(report)
}

/// Actions of the built-in walkthrough: add a friend, set its number,
/// flip the radio, try a value outside the radio set, remove the friend
pub(crate) fn scenario_script() -> ActionScript {
    ActionScript {
        actions: vec![
            FormAction::AppendEntry {
                collection: CollectionKind::Friends,
                defaults: serde_json::json!({ "favorites": { "color": "#0000ff" } }),
            },
            FormAction::SetField {
                path: "friends.0.favorites.number".to_string(),
                value: "42".to_string(),
            },
            FormAction::SetEnum {
                field: "likesTypescript".to_string(),
                value: "NO".to_string(),
            },
            FormAction::SetEnum {
                field: "likesTypescript".to_string(),
                value: "MAYBE".to_string(),
            },
            FormAction::RemoveEntry {
                collection: CollectionKind::Friends,
                index: 0,
            },
        ],
    }
}

fn describe(action: &FormAction) -> String {
    match action {
        FormAction::SetField { path, value } => format!("set {path} = {value:?}"),
        FormAction::SetEnum { field, value } => format!("choose {field} = {value}"),
        FormAction::AppendEntry {
            collection,
            defaults,
        } => format!("append to {collection} with {defaults}"),
        FormAction::RemoveEntry { collection, index } => format!("remove {collection}[{index}]"),
    }
}

fn describe_outcome(outcome: ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Written(true) => "changed".to_string(),
        ActionOutcome::Written(false) => "unchanged".to_string(),
        ActionOutcome::Appended(id) => format!("appended {id}"),
        ActionOutcome::Removed(id) => format!("removed {id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(options: ReplayOptions) -> (ReplayReport, String) {
        let mut store = FormStore::new();
        let mut out = Vec::new();
        let report = replay(&mut store, &scenario_script(), options, &mut out).unwrap();
        (report, String::from_utf8(out).unwrap())
    }

    #[test]
    fn scenario_rejects_only_the_unknown_choice() {
        let (report, output) = run(ReplayOptions::default());
        assert_eq!(report.applied, 4);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].0, 3);
        assert!(output.contains("[3] choose likesTypescript = MAYBE -> rejected"));
        assert!(output.contains("[4] remove friends[0] -> removed entry-1"));
        assert!(report.preview.contains("\"likesTypescript\": \"NO\""));
        assert!(report.preview.contains("\"friends\": []"));
    }

    #[test]
    fn stop_on_error_halts() {
        let (report, output) = run(ReplayOptions {
            stop_on_error: true,
            each: false,
        });
        assert_eq!(report.applied, 3);
        assert!(!output.contains("[4]"));
        // the friend is still there because removal never ran
        assert!(report.preview.contains("\"number\": 42"));
    }

    #[test]
    fn bundled_script_fills_the_form() {
        let script =
            ActionScript::from_yaml_str(include_str!("../scripts/friends.yaml")).unwrap();
        let mut store = FormStore::new();
        let mut out = Vec::new();
        let report = replay(&mut store, &script, ReplayOptions::default(), &mut out).unwrap();

        assert_eq!(report.applied, 9);
        assert_eq!(report.rejected.len(), 1);
        let snapshot = store.snapshot_json().unwrap();
        assert_eq!(snapshot["likesTypescript"], "YES_AGAIN");
        assert_eq!(
            snapshot["friends"][0],
            serde_json::json!({
                "name": "Charles",
                "birthday": "1791-12-26",
                "favorites": { "color": "#c0ffee", "number": 42 }
            })
        );
    }

    #[test]
    fn each_prints_preview_per_step() {
        let (_, output) = run(ReplayOptions {
            stop_on_error: false,
            each: true,
        });
        assert_eq!(output.matches("\"likesTypescript\"").count(), 5);
    }
}
