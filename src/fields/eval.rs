// src/fields/eval.rs

//! Placeholder evaluation against run statistics.
//!
//! Text slots may embed `{{.Name}}` placeholders; [`eval_fields`] rewrites
//! them in place using values from a [`Stats`] record. Recognized names:
//!
//! - `{{.Cmd}}` — child program name (first argv element)
//! - `{{.Args}}` — full argv, space-joined
//! - `{{.ExitCode}}` — exit code (`-1` for killed, `-` while running)
//! - `{{.Duration}}` — elapsed time, e.g. `1.203s`
//! - `{{.Status}}` — `done`, `failed`, `killed`, or `running`
//!
//! Unrecognized placeholders are left verbatim so a typo in a template is
//! visible in the notification rather than silently erased. Number slots
//! and placeholder-free text are untouched, which also makes evaluation
//! idempotent.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::fields::{FieldSet, SlotMut};
use crate::run::Stats;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // `{{.Name}}`, optional inner whitespace.
        Regex::new(r"\{\{\s*\.(\w+)\s*\}\}").unwrap()
    })
}

/// Rewrite every text slot of `fields` in place, resolving placeholders
/// against `stats`.
pub fn eval_fields(fields: &mut dyn FieldSet, stats: &Stats) {
    for slot in fields.slots_mut() {
        if let SlotMut::Text(text) = slot {
            if text.contains("{{") {
                let rendered = render(text, stats);
                *text = rendered;
            }
        }
    }
}

fn render(template: &str, stats: &Stats) -> String {
    placeholder_re()
        .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
            "Cmd" => stats.cmd().to_string(),
            "Args" => stats.argv.join(" "),
            "ExitCode" => stats.exit_code_display(),
            "Duration" => stats.duration_display(),
            "Status" => stats.status.to_string(),
            // Unknown name: keep the placeholder text as written.
            _ => caps[0].to_string(),
        })
        .into_owned()
}
