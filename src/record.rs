// src/record.rs
//
// One scraped project. Identity fields are required; everything else is
// optional and stays `None` when the source page omits or garbles it.

use chrono::NaiveDate;

/// Free-text fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextField {
    Ptn,
    ProjectName,
    ProjectScope,
    CertType,
    OfficeId,
    ApplicationNo,
    FileNo,
    PtnNo,
    OpscNo,
    ProjectType,
    ProjectClass,
    SpecialType,
    Increments,
    Address,
    City,
    Zip,
}

impl TextField {
    pub const COUNT: usize = 16;
}

/// Cost fields, in dollars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoneyField {
    Estimated,
    Contracted,
    ChangeDocument,
    FinalCost,
    Adjustment1,
    Adjustment2,
}

impl MoneyField {
    pub const COUNT: usize = 6;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DateField {
    Adjustment1,
    Adjustment2,
    Received,
    Approved,
    ApprovalExt,
    Closed,
    CompleteSubmittal,
}

impl DateField {
    pub const COUNT: usize = 7;
}

/// Compliance/safety checkboxes on the summary page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Indicator {
    Sb575,
    NewCampus,
    Modernization,
    AutoFireDetection,
    SprinklerSystem,
    AccessCompliance,
    FireLifeSafety,
    StructuralSafety,
    FieldReview,
    CgsReview,
    Hps,
}

impl Indicator {
    pub const ALL: [Indicator; 11] = [
        Indicator::Sb575,
        Indicator::NewCampus,
        Indicator::Modernization,
        Indicator::AutoFireDetection,
        Indicator::SprinklerSystem,
        Indicator::AccessCompliance,
        Indicator::FireLifeSafety,
        Indicator::StructuralSafety,
        Indicator::FieldReview,
        Indicator::CgsReview,
        Indicator::Hps,
    ];

    /// Label text as printed next to the checkbox.
    pub fn label(self) -> &'static str {
        match self {
            Indicator::Sb575 => "SB 575",
            Indicator::NewCampus => "New Campus",
            Indicator::Modernization => "Modernization",
            Indicator::AutoFireDetection => "Auto Fire Detection",
            Indicator::SprinklerSystem => "Sprinkler System",
            Indicator::AccessCompliance => "Access Compliance",
            Indicator::FireLifeSafety => "Fire & Life Safety",
            Indicator::StructuralSafety => "Structural Safety",
            Indicator::FieldReview => "Field Review",
            Indicator::CgsReview => "CGS Review",
            Indicator::Hps => "HPS",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectRecord {
    /// Absolute URL of the application summary page
    pub link: String,
    pub origin_id: String,
    pub app_id: String,

    text: [Option<String>; TextField::COUNT],
    money: [Option<f64>; MoneyField::COUNT],
    dates: [Option<NaiveDate>; DateField::COUNT],
    flags: [Option<bool>; 11],
}

impl ProjectRecord {
    pub fn new(link: impl Into<String>, origin_id: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            origin_id: origin_id.into(),
            app_id: app_id.into(),
            ..Self::default()
        }
    }

    /// "DSA AppId" as shown on the site: `<OriginId> <AppId>`.
    pub fn dsa_app_id(&self) -> String {
        if self.origin_id.is_empty() || self.app_id.is_empty() {
            return s!();
        }
        s!("{} {}", self.origin_id, self.app_id)
    }

    pub fn is_valid(&self) -> bool {
        !self.link.trim().is_empty() && !self.dsa_app_id().is_empty()
    }

    pub fn text(&self, f: TextField) -> Option<&str> {
        self.text[f as usize].as_deref()
    }

    /// Blank values clear the field.
    pub fn set_text(&mut self, f: TextField, value: impl Into<String>) {
        let v = value.into();
        self.text[f as usize] = if v.trim().is_empty() { None } else { Some(v) };
    }

    pub fn money(&self, f: MoneyField) -> Option<f64> {
        self.money[f as usize]
    }

    pub fn set_money(&mut self, f: MoneyField, value: Option<f64>) {
        self.money[f as usize] = value;
    }

    pub fn date(&self, f: DateField) -> Option<NaiveDate> {
        self.dates[f as usize]
    }

    pub fn set_date(&mut self, f: DateField, value: Option<NaiveDate>) {
        self.dates[f as usize] = value;
    }

    pub fn flag(&self, i: Indicator) -> Option<bool> {
        self.flags[i as usize]
    }

    pub fn set_flag(&mut self, i: Indicator, value: bool) {
        self.flags[i as usize] = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_needs_link_and_both_ids() {
        assert!(ProjectRecord::new("https://x/a", "36", "101").is_valid());
        assert!(!ProjectRecord::new("", "36", "101").is_valid());
        assert!(!ProjectRecord::new("https://x/a", "36", "").is_valid());
        assert_eq!(ProjectRecord::new("l", "36", "101").dsa_app_id(), "36 101");
    }

    #[test]
    fn optional_fields_default_to_none() {
        let mut r = ProjectRecord::new("l", "1", "2");
        assert_eq!(r.text(TextField::Ptn), None);
        assert_eq!(r.money(MoneyField::Estimated), None);
        assert_eq!(r.flag(Indicator::Hps), None);

        r.set_text(TextField::Ptn, "12345-6");
        r.set_text(TextField::City, "   ");
        r.set_flag(Indicator::Hps, true);
        assert_eq!(r.text(TextField::Ptn), Some("12345-6"));
        assert_eq!(r.text(TextField::City), None);
        assert_eq!(r.flag(Indicator::Hps), Some(true));
    }

    #[test]
    fn enum_counts_cover_every_variant() {
        assert_eq!(TextField::Zip as usize + 1, TextField::COUNT);
        assert_eq!(MoneyField::Adjustment2 as usize + 1, MoneyField::COUNT);
        assert_eq!(DateField::CompleteSubmittal as usize + 1, DateField::COUNT);
        assert_eq!(Indicator::Hps as usize + 1, Indicator::ALL.len());
    }
}
