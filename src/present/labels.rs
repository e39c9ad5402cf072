/// Display bucket for a predicted label, rendered as a text colour class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Caution,
    Alert,
}

impl Severity {
    /// Chosen by substring match so that any label mentioning a cycle length
    /// class is bucketed consistently.
    pub fn for_label(label: &str) -> Severity {
        if label.contains("Siklus Sedang") {
            Severity::Normal
        } else if label.contains("Siklus Pendek") || label.contains("Siklus Panjang") {
            Severity::Caution
        } else {
            Severity::Alert
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Normal  => "text-green-600",
            Severity::Caution => "text-yellow-600",
            Severity::Alert   => "text-red-600",
        }
    }
}

pub const UNKNOWN: &str = "Tidak Diketahui";

/// Buckets a cycle length in days: below 21 short, 21 to 35 medium, above 35 long.
pub fn cycle_category(days: f64) -> &'static str {
    if days < 21.0 {
        "Siklus Pendek"
    } else if days <= 35.0 {
        "Siklus Sedang"
    } else {
        "Siklus Panjang"
    }
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "Ya" } else { "Tidak" }
}

/// Diet and reproductive-health scores (1..=5).
pub fn health_score(score: i64) -> &'static str {
    match score {
        1 | 2 => "Buruk",
        3     => "Normal",
        4 | 5 => "Baik",
        _     => UNKNOWN,
    }
}

/// Stress score (1..=5).
pub fn stress_score(score: i64) -> &'static str {
    match score {
        1 => "Rendah",
        2 => "Sedang",
        3 => "Normal",
        4 => "Tinggi",
        5 => "Sangat Tinggi",
        _ => UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_category_boundaries() {
        assert_eq!(cycle_category(20.0), "Siklus Pendek");
        assert_eq!(cycle_category(20.9), "Siklus Pendek");
        assert_eq!(cycle_category(21.0), "Siklus Sedang");
        assert_eq!(cycle_category(35.0), "Siklus Sedang");
        assert_eq!(cycle_category(35.5), "Siklus Panjang");
        assert_eq!(cycle_category(36.0), "Siklus Panjang");
    }

    #[test]
    fn score_tables() {
        let health: Vec<_> = (1..=5).map(health_score).collect();
        assert_eq!(health, ["Buruk", "Buruk", "Normal", "Baik", "Baik"]);
        let stress: Vec<_> = (1..=5).map(stress_score).collect();
        assert_eq!(stress, ["Rendah", "Sedang", "Normal", "Tinggi", "Sangat Tinggi"]);
        assert_eq!(health_score(0), UNKNOWN);
        assert_eq!(stress_score(6), UNKNOWN);
    }

    #[test]
    fn severity_by_label_text() {
        assert_eq!(Severity::for_label("Siklus Sedang"), Severity::Normal);
        assert_eq!(Severity::for_label("Siklus Pendek"), Severity::Caution);
        assert_eq!(Severity::for_label("Siklus Panjang"), Severity::Caution);
        assert_eq!(Severity::for_label("Tidak Normal"), Severity::Alert);
        assert_eq!(Severity::for_label("Tidak Diketahui"), Severity::Alert);
        assert_eq!(Severity::Normal.css_class(), "text-green-600");
        assert_eq!(Severity::Caution.css_class(), "text-yellow-600");
        assert_eq!(Severity::Alert.css_class(), "text-red-600");
    }

    #[test]
    fn yes_no_labels() {
        assert_eq!(yes_no(true), "Ya");
        assert_eq!(yes_no(false), "Tidak");
    }
}
