//! # Compare Subcommand
//!
//! Comparison of the selected profession and topic policies of every party,
//! optionally followed by the candidates of one district. Plain text by
//! default, or a JSON document with `--format json`.
//!
//! Reads the dataset the way a display layer does: a load failure degrades
//! to an empty dataset and is reported on stderr, and parties missing a
//! section simply show nothing for it.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use plens_core::{load_or_empty, CandidateView, Catalog, PartyView, PolicyItem};

use crate::OutputFormat;

/// Arguments for the `plens compare` subcommand.
#[derive(Args, Debug, Default)]
pub struct CompareArgs {
    /// Profession to compare policies for. Repeatable.
    #[arg(short, long = "profession", value_name = "PROFESSION")]
    pub professions: Vec<String>,

    /// General policy topic to compare. Repeatable.
    #[arg(short, long = "topic", value_name = "TOPIC")]
    pub topics: Vec<String>,

    /// Select every profession and topic in the dataset.
    #[arg(long)]
    pub all: bool,

    /// Show the candidates of this district.
    #[arg(short, long)]
    pub district: Option<String>,

    /// Hide explanations.
    #[arg(long)]
    pub no_explanations: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// One party's share of the comparison.
#[derive(Debug, Serialize)]
struct PartyComparison {
    name: String,
    professions: Vec<ProfessionPolicies>,
    general_policies: Vec<TopicPolicy>,
}

#[derive(Debug, Serialize)]
struct ProfessionPolicies {
    profession: String,
    policies: Vec<PolicyItem>,
}

#[derive(Debug, Serialize)]
struct TopicPolicy {
    topic: String,
    #[serde(flatten)]
    policy: PolicyItem,
}

#[derive(Debug, Serialize)]
struct DistrictCandidates {
    name: String,
    /// `None` when the district does not exist.
    candidates: Option<Vec<CandidateView>>,
}

#[derive(Debug, Serialize)]
struct Comparison {
    professions: Vec<String>,
    topics: Vec<String>,
    parties: Vec<PartyComparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    district: Option<DistrictCandidates>,
}

impl PartyComparison {
    fn collect(
        party: &PartyView<'_>,
        professions: &[String],
        topics: &[String],
        with_explanations: bool,
    ) -> Self {
        Self {
            name: party.name().to_owned(),
            professions: professions
                .iter()
                .filter_map(|p| {
                    party
                        .profession_policies(p, with_explanations)
                        .map(|policies| ProfessionPolicies {
                            profession: p.clone(),
                            policies,
                        })
                })
                .collect(),
            general_policies: topics
                .iter()
                .filter_map(|t| {
                    party.topic_policy(t, with_explanations).map(|policy| TopicPolicy {
                        topic: t.clone(),
                        policy,
                    })
                })
                .collect(),
        }
    }

    fn is_empty(&self) -> bool {
        self.professions.is_empty() && self.general_policies.is_empty()
    }
}

/// Execute the compare subcommand, printing to stdout.
pub fn run_compare(args: &CompareArgs, dataset: &Path) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    compare_to(args, dataset, &mut out)
}

/// Execute the compare subcommand, writing to `out`.
///
/// Exit code 1 if the dataset could not be loaded or the district does not
/// exist, otherwise 0.
pub fn compare_to(args: &CompareArgs, dataset: &Path, out: &mut impl Write) -> Result<u8> {
    let outcome = load_or_empty(dataset);
    if let Some(err) = &outcome.failure {
        eprintln!("{err}");
    }

    let catalog = Catalog::new(&outcome.dataset);
    let (professions, topics) = if args.all {
        (catalog.profession_options(), catalog.topic_options())
    } else {
        (args.professions.clone(), args.topics.clone())
    };

    let with_explanations = !args.no_explanations;
    let parties = if professions.is_empty() && topics.is_empty() {
        Vec::new()
    } else {
        catalog
            .parties()
            .map(|party| PartyComparison::collect(&party, &professions, &topics, with_explanations))
            .collect()
    };

    let comparison = Comparison {
        district: args.district.as_ref().map(|name| DistrictCandidates {
            name: name.clone(),
            candidates: catalog.candidates(name),
        }),
        professions,
        topics,
        parties,
    };

    let unknown_district = comparison
        .district
        .as_ref()
        .is_some_and(|d| d.candidates.is_none());
    let code = u8::from(outcome.failure.is_some() || unknown_district);

    match args.format {
        OutputFormat::Text => {
            out.write_all(render_text(&comparison).as_bytes())
                .context("failed to write comparison")?;
        }
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(&comparison)
                .context("failed to serialize comparison")?;
            writeln!(out, "{rendered}").context("failed to write comparison")?;
        }
    }
    Ok(code)
}

fn render_text(comparison: &Comparison) -> String {
    let mut out = String::new();
    let nothing_selected = comparison.professions.is_empty() && comparison.topics.is_empty();

    if nothing_selected {
        if comparison.district.is_none() {
            let _ = writeln!(
                out,
                "Select at least one --profession or --topic (see `plens options`)."
            );
        }
    } else {
        for party in &comparison.parties {
            render_party(&mut out, party);
        }
    }

    if let Some(district) = &comparison.district {
        render_district(&mut out, district);
    }
    out
}

fn render_party(out: &mut String, party: &PartyComparison) {
    let _ = writeln!(out, "== {} ==", party.name);

    for group in &party.professions {
        let _ = writeln!(out, "  [{}]", group.profession);
        for item in &group.policies {
            render_item(out, None, item);
        }
    }

    if !party.general_policies.is_empty() {
        let _ = writeln!(out, "  [General policies]");
        for entry in &party.general_policies {
            render_item(out, Some(&entry.topic), &entry.policy);
        }
    }

    if party.is_empty() {
        let _ = writeln!(out, "  (no matching policies)");
    }
    let _ = writeln!(out);
}

fn render_item(out: &mut String, label: Option<&str>, item: &PolicyItem) {
    match label {
        Some(label) => {
            let _ = writeln!(out, "    - {label}: {}", item.text);
        }
        None => {
            let _ = writeln!(out, "    - {}", item.text);
        }
    }
    if let Some(explanation) = &item.explanation {
        for line in explanation.lines() {
            if line.is_empty() {
                let _ = writeln!(out, "        >");
            } else {
                let _ = writeln!(out, "        > {line}");
            }
        }
    }
}

fn render_district(out: &mut String, district: &DistrictCandidates) {
    let Some(candidates) = &district.candidates else {
        let _ = writeln!(out, "No district named '{}'.", district.name);
        return;
    };

    let _ = writeln!(out, "Candidates in {}:", district.name);
    if candidates.is_empty() {
        let _ = writeln!(out, "  No candidates registered for this district yet.");
    }
    for candidate in candidates {
        match &candidate.note {
            Some(note) => {
                let _ = writeln!(out, "  - {} ({}): {note}", candidate.name, candidate.party);
            }
            None => {
                let _ = writeln!(out, "  - {} ({})", candidate.name, candidate.party);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"{
        "parties": [
            {
                "name": "Green",
                "personalized_policies": { "Nurse": ["More staff", "Better pay"] },
                "personalized_explanations": { "Nurse": ["Hire 10k nurses."] },
                "general_policies": { "Tax": "Cut" },
                "general_explanations": { "Tax": "For low incomes." }
            },
            {
                "name": "Blue",
                "general_policies": { "Energy": "Nuclear" }
            }
        ],
        "districts": {
            "Harbor 1": [
                { "name": "Sato", "party": "Green", "note": "Incumbent" },
                { "name": "Ito" }
            ],
            "Hill 2": []
        }
    }"#;

    fn run(args: CompareArgs) -> (u8, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("election_data.json");
        std::fs::write(&path, DATASET).unwrap();
        let mut out = Vec::new();
        let code = compare_to(&args, &path, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn compares_selected_profession_and_topic() {
        let (code, out) = run(CompareArgs {
            professions: vec!["Nurse".into()],
            topics: vec!["Tax".into()],
            ..CompareArgs::default()
        });
        assert_eq!(code, 0);
        assert_eq!(
            out,
            "== Green ==\n  [Nurse]\n    - More staff\n        > Hire 10k nurses.\n    - Better pay\n  [General policies]\n    - Tax: Cut\n        > For low incomes.\n\n== Blue ==\n  (no matching policies)\n\n"
        );
    }

    #[test]
    fn explanations_can_be_hidden() {
        let (_, out) = run(CompareArgs {
            all: true,
            no_explanations: true,
            ..CompareArgs::default()
        });
        assert!(!out.contains('>'));
        assert!(out.contains("    - Energy: Nuclear\n"));
    }

    #[test]
    fn nothing_selected_prints_hint() {
        let (code, out) = run(CompareArgs::default());
        assert_eq!(code, 0);
        assert!(out.starts_with("Select at least one"));
    }

    #[test]
    fn district_candidates_with_defaults() {
        let (code, out) = run(CompareArgs {
            district: Some("Harbor 1".into()),
            ..CompareArgs::default()
        });
        assert_eq!(code, 0);
        assert!(out.starts_with("Candidates in Harbor 1:\n  - Sato (Green): Incumbent\n  - Ito (Independent)\n"));
        assert!(!out.contains("Select at least one"));
    }

    #[test]
    fn json_output_carries_policies_and_candidates() {
        let (code, out) = run(CompareArgs {
            professions: vec!["Nurse".into()],
            topics: vec!["Tax".into()],
            district: Some("Harbor 1".into()),
            format: OutputFormat::Json,
            ..CompareArgs::default()
        });
        assert_eq!(code, 0);

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let green = &value["parties"][0];
        assert_eq!(green["name"], "Green");
        assert_eq!(green["professions"][0]["profession"], "Nurse");
        assert_eq!(green["professions"][0]["policies"][0]["text"], "More staff");
        assert_eq!(
            green["professions"][0]["policies"][0]["explanation"],
            "Hire 10k nurses."
        );
        assert!(green["professions"][0]["policies"][1]
            .get("explanation")
            .is_none());
        assert_eq!(green["general_policies"][0]["topic"], "Tax");
        assert_eq!(green["general_policies"][0]["text"], "Cut");
        assert_eq!(value["parties"][1]["professions"], serde_json::json!([]));

        let candidates = &value["district"]["candidates"];
        assert_eq!(candidates[0]["note"], "Incumbent");
        assert_eq!(candidates[1]["party"], "Independent");
        assert!(candidates[1].get("note").is_none());
    }

    #[test]
    fn json_output_marks_unknown_district() {
        let (code, out) = run(CompareArgs {
            district: Some("Nowhere".into()),
            format: OutputFormat::Json,
            ..CompareArgs::default()
        });
        assert_eq!(code, 1);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value["district"]["candidates"].is_null());
        assert_eq!(value["parties"], serde_json::json!([]));
    }

    #[test]
    fn empty_and_unknown_districts() {
        let (code, out) = run(CompareArgs {
            district: Some("Hill 2".into()),
            ..CompareArgs::default()
        });
        assert_eq!(code, 0);
        assert!(out.contains("No candidates registered"));

        let (code, out) = run(CompareArgs {
            district: Some("Nowhere".into()),
            ..CompareArgs::default()
        });
        assert_eq!(code, 1);
        assert!(out.contains("No district named 'Nowhere'."));
    }

    #[test]
    fn missing_dataset_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let code = compare_to(
            &CompareArgs {
                all: true,
                ..CompareArgs::default()
            },
            &dir.path().join("election_data.json"),
            &mut out,
        )
        .unwrap();
        assert_eq!(code, 1);
        assert!(String::from_utf8(out).unwrap().starts_with("Select at least one"));
    }
}
