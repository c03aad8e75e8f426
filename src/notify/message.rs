use crate::alerts::Alert;

/// Render an alert as SMS text
///
/// Summary and description on their own lines, a blank line, then one
/// `key: value` line per label.
pub fn format_message(alert: &Alert) -> String {
    let mut message = format!(
        "{}\n{}\n\n",
        alert.annotations.summary, alert.annotations.description
    );

    for (key, value) in &alert.labels {
        message.push_str(&format!("{}: {}\n", key, value));
    }

    message
}
