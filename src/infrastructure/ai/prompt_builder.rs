use std::fmt::Write;

use crate::domain::entities::cluster::ClusterAnalysis;

/// Maximum characters of citizen-supplied text echoed into the prompt.
const MAX_FIELD_CHARS: usize = 80;

pub struct PromptBuilder;

impl PromptBuilder {
    #[must_use]
    pub fn build(analysis: &ClusterAnalysis) -> String {
        let mut prompt = String::with_capacity(2048);

        prompt.push_str(
            "You are EpiWatch, a public-health surveillance assistant. \
             The following disease clusters were detected from citizen symptom reports. \
             Summarize the situation for a health authority.\n\n",
        );

        let _ = write!(
            prompt,
            "## Detection Window\n\
             - analysed_at: {}\n\
             - window_hours: {}\n\
             - clusters_detected: {}\n\n",
            analysis.analysed_at.to_rfc3339(),
            analysis.window_hours,
            analysis.clusters_detected,
        );

        prompt.push_str("## Clusters\n");
        for cluster in &analysis.clusters {
            let _ = writeln!(
                prompt,
                "- {} in {}: {} reports, confidence {:.2} (rule {})",
                cluster.predicted_disease_type,
                truncate(cluster.area.as_str()),
                cluster.total_reports,
                cluster.confidence,
                cluster.detection_rule,
            );
            let counts: Vec<String> = cluster
                .symptom_counts
                .iter()
                .map(|(symptom, count)| format!("{symptom}={count}"))
                .collect();
            let _ = writeln!(prompt, "  symptoms: {}", counts.join(", "));
        }
        prompt.push('\n');

        prompt.push_str(
            "Respond ONLY with a JSON object matching this exact structure:\n\
             {\"summary\": \"one-line situation summary\", \
             \"details\": \"assessment and priorities for the health authority\"}\n",
        );

        prompt
    }
}

fn truncate(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_control())
        .take(MAX_FIELD_CHARS)
        .collect()
}
