//! Urgency ranking labels

use nwx_common::model::Urgency;
use nwx_common::Locale;

static RANKING_LABELS_EN: [&str; 8] = [
    "Flash",
    "Bulletin",
    "Urgent",
    "Must Have",
    "Should Have",
    "Could Have",
    "Nice to Have",
    "Filler",
];

static RANKING_LABELS_FR: [&str; 8] = [
    "Flash",
    "Bulletin",
    "Urgent",
    "Incontournable",
    "Important",
    "Intéressant",
    "Secondaire",
    "Remplissage",
];

/// Localized label for an urgency value
pub fn ranking_label(urgency: Urgency, locale: Locale) -> &'static str {
    let table = match locale {
        Locale::EnCa => &RANKING_LABELS_EN,
        Locale::FrCa => &RANKING_LABELS_FR,
    };
    table[(urgency.get() - Urgency::MIN) as usize]
}

/// Item urgency, or `default` clamped into 1-8 when missing
pub fn effective_urgency(urgency: Option<Urgency>, default: u8) -> Urgency {
    urgency.unwrap_or_else(|| Urgency::clamped(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_per_locale() {
        let u4 = Urgency::new(4).unwrap();
        assert_eq!(ranking_label(u4, Locale::EnCa), "Must Have");
        assert_eq!(ranking_label(u4, Locale::FrCa), "Incontournable");
        assert_eq!(ranking_label(Urgency::new(1).unwrap(), Locale::EnCa), "Flash");
        assert_eq!(ranking_label(Urgency::new(8).unwrap(), Locale::FrCa), "Remplissage");
    }

    #[test]
    fn test_effective_urgency_default() {
        assert_eq!(effective_urgency(None, 3).get(), 3);
        assert_eq!(effective_urgency(Urgency::new(2), 3).get(), 2);
        assert_eq!(effective_urgency(None, 42).get(), 8);
    }
}
