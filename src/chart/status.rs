use crate::chart::record::SymbolRecord;

/// Shown whenever nothing is hovered
pub const DEFAULT_PROMPT: &str = "Hover over a circle for more details";

/// Single-line status text: the default prompt or one message. No history.
#[derive(Clone, Debug, Default)]
pub struct StatusLine {
    message: Option<String>,
}

impl StatusLine {
    pub fn set(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn reset(&mut self) {
        self.message = None;
    }

    pub fn text(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_PROMPT)
    }
}

/// Hover sentence for one record
pub fn hover_message(record: &SymbolRecord) -> String {
    let mag = record
        .mag
        .map_or_else(|| "unknown".to_string(), |m| m.to_string());
    format!(
        "{}, received an earthquake with a magnitude of {} at {}",
        record.place, mag, record.time
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_states() {
        let mut status = StatusLine::default();
        assert_eq!(status.text(), DEFAULT_PROMPT);
        status.set("Map data loaded.");
        assert_eq!(status.text(), "Map data loaded.");
        status.reset();
        assert_eq!(status.text(), DEFAULT_PROMPT);
    }

    #[test]
    fn test_hover_message() {
        let record = SymbolRecord {
            place: "X".into(),
            mag: Some(5.2),
            time: "T1".into(),
            ..SymbolRecord::default()
        };
        assert_eq!(
            hover_message(&record),
            "X, received an earthquake with a magnitude of 5.2 at T1"
        );
    }
}
