use std::{
    fmt::Write as _,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::info;

use crate::{
    TracksideError,
    diagnostics::{DiagnosticReport, Severity, group_by_category},
};

/// Read one diagnostic request per line from a JSON lines file.
pub fn read_requests<T>(source_file: &Path) -> Result<Vec<T>, TracksideError>
where
    T: serde::de::DeserializeOwned,
{
    serde_jsonlines::json_lines(source_file)
        .map_err(|e| TracksideError::BatchReadError { source: e })?
        .collect::<Result<Vec<T>, std::io::Error>>()
        .map_err(|e| TracksideError::BatchReadError { source: e })
}

/// Pretty-printed JSON for a single report.
pub fn report_to_json(report: &DiagnosticReport) -> Result<String, TracksideError> {
    serde_json::to_string_pretty(report)
        .map_err(|e| TracksideError::ReportSerializeError { source: e })
}

/// Write reports as JSON lines, one report per line.
pub fn write_reports(file: &Path, reports: &[DiagnosticReport]) -> Result<(), TracksideError> {
    let report_file = File::create(file).map_err(|e| TracksideError::WriterError { source: e })?;
    let mut report_writer = BufWriter::new(report_file);
    for report in reports {
        let line = serde_json::to_string(report)
            .map_err(|e| TracksideError::ReportSerializeError { source: e })?;
        writeln!(report_writer, "{}", line)
            .map_err(|e| TracksideError::WriterError { source: e })?;
    }
    report_writer
        .flush()
        .map_err(|e| TracksideError::WriterError { source: e })?;
    info!("Wrote {} reports to {:?}", reports.len(), file);
    Ok(())
}

fn badge(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "[!!!]",
        Severity::High => "[!! ]",
        Severity::Medium => "[ ! ]",
        Severity::Low => "[ - ]",
    }
}

/// Render a report for the terminal.
pub fn render_report(report: &DiagnosticReport) -> String {
    let mut out = String::new();
    if let Some(name) = &report.setup_name {
        let _ = writeln!(out, "Setup: {}", name);
    }
    let _ = writeln!(
        out,
        "Tier: {} | Downforce: {} ({:.1}) | Aero balance: {}% front",
        report.tier,
        report.metrics.downforce_level,
        report.metrics.downforce_score,
        report.metrics.aero_balance_percent_front
    );

    if report.is_clean() {
        let _ = writeln!(out, "\nNo issues detected for the reported symptoms.");
        return out;
    }

    for (category, recs) in group_by_category(&report.recommendations) {
        let _ = writeln!(out, "\n== {} ==", category);
        for rec in recs {
            let _ = writeln!(
                out,
                "{} {} {}: {}",
                badge(rec.severity),
                rec.severity,
                rec.title,
                rec.problem
            );
            for (i, solution) in rec.solutions.iter().enumerate() {
                let _ = writeln!(out, "    {}. {}", i + 1, solution);
            }
            if !rec.rationale.is_empty() {
                let _ = writeln!(out, "    Why: {}", rec.rationale);
            }
            if let Some(caution) = &rec.caution {
                let _ = writeln!(out, "    Caution: {}", caution);
            }
            if let Some(important) = &rec.important {
                let _ = writeln!(out, "    Important: {}", important);
            }
        }
    }

    if !report.conflicts.is_empty() {
        let _ = writeln!(out, "\n== Conflicting advice ==");
        for conflict in &report.conflicts {
            let _ = writeln!(
                out,
                "    {}: \"{}\" ({}) vs \"{}\" ({})",
                conflict.control,
                conflict.first.solution,
                conflict.first.rule_id,
                conflict.second.solution,
                conflict.second.rule_id
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{
        AnalysisTier, ConfigurationProfile, DiagnosticEngine, DiagnosticRequest, Symptom,
        SymptomProfile, TrackContext,
    };
    use tempfile::TempDir;

    fn report(symptoms: &[Symptom], tier: AnalysisTier) -> DiagnosticReport {
        DiagnosticEngine::new(tier).report(
            &ConfigurationProfile::default(),
            &SymptomProfile::from_symptoms(symptoms.iter().copied()),
            &TrackContext::default(),
        )
    }

    #[test]
    fn test_render_clean_report() {
        let rendered = render_report(&report(&[], AnalysisTier::Basic));
        assert!(rendered.contains("No issues detected"));
        assert!(rendered.contains("Tier: basic"));
    }

    #[test]
    fn test_render_groups_and_badges() {
        let rendered = render_report(&report(
            &[Symptom::EntryUndersteer, Symptom::ExitOversteer],
            AnalysisTier::Premium,
        ));
        let entry = rendered.find("== Corner Entry ==").unwrap();
        let exit = rendered.find("== Corner Exit ==").unwrap();
        assert!(entry < exit);
        assert!(rendered.contains("[!! ] HIGH"));
        assert!(rendered.contains("1. Soften front springs"));
        assert!(rendered.contains("Important:"));
    }

    #[test]
    fn test_render_lists_conflicts() {
        let rendered = render_report(&report(
            &[Symptom::EntryUndersteer, Symptom::MidCornerUndersteer],
            AnalysisTier::Premium,
        ));
        assert!(rendered.contains("== Conflicting advice =="));
        assert!(rendered.contains("front springs"));
    }

    #[test]
    fn test_report_to_json_uses_camel_case() {
        let report = report(&[Symptom::EntryUndersteer], AnalysisTier::Basic);
        let json = report_to_json(&report).unwrap();
        assert!(json.contains("\"recommendations\""));
        assert!(json.contains("\"ruleId\": \"entry-understeer\""));
        assert!(json.contains("\"aeroBalancePercentFront\": 50"));
        assert!(!json.contains("\"caution\""));
    }

    #[test]
    fn test_serialize_errors_name_what_failed() {
        let source = serde_json::from_str::<u8>("x").unwrap_err();
        let err = TracksideError::ReportSerializeError { source };
        assert_eq!(err.to_string(), "Error serializing diagnostic report");

        let source = serde_json::from_str::<u8>("x").unwrap_err();
        let err = TracksideError::SetupSerializeError {
            name: "Sebring".to_string(),
            source,
        };
        assert_eq!(err.to_string(), "Error serializing setup Sebring");
    }

    #[test]
    fn test_batch_files_round_trip_through_engine() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("requests.jsonl");
        let output = temp_dir.path().join("reports.jsonl");
        std::fs::write(
            &input,
            concat!(
                r#"{"setupName": "Sebring", "symptoms": {"entryUndersteer": true}}"#,
                "\n",
                r#"{"tier": "free", "config": {"aero": {"rearWingAngle": "6"}}}"#,
                "\n"
            ),
        )
        .unwrap();

        let requests: Vec<DiagnosticRequest> = read_requests(&input).unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].tier, Some(AnalysisTier::Basic));

        let engine = DiagnosticEngine::default();
        let reports: Vec<_> = requests.iter().map(|r| engine.handle(r)).collect();
        write_reports(&output, &reports).unwrap();

        let written: Vec<DiagnosticReport> = read_requests(&output).unwrap();
        assert_eq!(written, reports);
        assert_eq!(written[0].setup_name.as_deref(), Some("Sebring"));
        assert!(written[1].is_clean());
    }

    #[test]
    fn test_malformed_batch_line_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("requests.jsonl");
        std::fs::write(&input, "{\"symptoms\": 3}\n").unwrap();

        let result: Result<Vec<DiagnosticRequest>, _> = read_requests(&input);
        assert!(matches!(result, Err(TracksideError::BatchReadError { .. })));
    }
}
