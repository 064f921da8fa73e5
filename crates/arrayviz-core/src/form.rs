//! Typed snapshot of the layout form.
//!
//! Raw control values are parsed once per event into a `FormState` which is
//! then handed by value to the placement rules. Malformed numbers become
//! `None` and therefore mean "leave unchanged", never zero.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Posture {
    #[default]
    Seated,
    Standing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

/// Every form control that feeds the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    ArraySpan,
    ArrayDepth,
    ArrayBottom,
    SubCenterDistance,
    SubDepth,
    AudienceFirstRow,
    AudienceLastRow,
    SubLrConfig,
    ReferenceFromBelow,
    Posture,
    Units,
}

impl Field {
    pub const NUMERIC: [Field; 7] = [
        Field::ArraySpan,
        Field::ArrayDepth,
        Field::ArrayBottom,
        Field::SubCenterDistance,
        Field::SubDepth,
        Field::AudienceFirstRow,
        Field::AudienceLastRow,
    ];

    pub const ALL: [Field; 11] = [
        Field::ArraySpan,
        Field::ArrayDepth,
        Field::ArrayBottom,
        Field::SubCenterDistance,
        Field::SubDepth,
        Field::AudienceFirstRow,
        Field::AudienceLastRow,
        Field::SubLrConfig,
        Field::ReferenceFromBelow,
        Field::Posture,
        Field::Units,
    ];

    /// Name used in the form's URL query.
    pub fn query_key(self) -> &'static str {
        match self {
            Field::ArraySpan => "as",
            Field::ArrayDepth => "ad",
            Field::ArrayBottom => "abz",
            Field::SubCenterDistance => "sy",
            Field::SubDepth => "sx",
            Field::AudienceFirstRow => "axf",
            Field::AudienceLastRow => "axl",
            Field::SubLrConfig => "sub",
            Field::ReferenceFromBelow => "xoff",
            Field::Posture => "audience",
            Field::Units => "units",
        }
    }

    pub fn from_query_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.query_key() == key)
    }

    pub fn is_numeric(self) -> bool {
        Field::NUMERIC.contains(&self)
    }
}

/// Parse a numeric text field. Empty, non-numeric, NaN and infinite input all
/// yield `None`.
pub fn parse_number(raw: &str) -> Option<f32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Parse a checkbox-style query value.
pub fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim(), "on" | "true" | "1" | "yes")
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FormState {
    pub array_span: Option<f32>,
    pub array_depth: Option<f32>,
    pub array_bottom: Option<f32>,
    pub sub_center_distance: Option<f32>,
    pub sub_depth: Option<f32>,
    pub audience_first_row: Option<f32>,
    pub audience_last_row: Option<f32>,
    pub sub_lr: bool,
    pub reference_from_below: bool,
    pub posture: Posture,
    pub units: UnitSystem,
}

impl FormState {
    pub fn number(&self, field: Field) -> Option<f32> {
        match field {
            Field::ArraySpan => self.array_span,
            Field::ArrayDepth => self.array_depth,
            Field::ArrayBottom => self.array_bottom,
            Field::SubCenterDistance => self.sub_center_distance,
            Field::SubDepth => self.sub_depth,
            Field::AudienceFirstRow => self.audience_first_row,
            Field::AudienceLastRow => self.audience_last_row,
            _ => None,
        }
    }

    /// Store the raw text of one control. Toggles accept the same spellings as
    /// `parse_flag`; posture and units accept their query values.
    pub fn set_raw(&mut self, field: Field, raw: &str) {
        let num = parse_number(raw);
        match field {
            Field::ArraySpan => self.array_span = num,
            Field::ArrayDepth => self.array_depth = num,
            Field::ArrayBottom => self.array_bottom = num,
            Field::SubCenterDistance => self.sub_center_distance = num,
            Field::SubDepth => self.sub_depth = num,
            Field::AudienceFirstRow => self.audience_first_row = num,
            Field::AudienceLastRow => self.audience_last_row = num,
            Field::SubLrConfig => self.sub_lr = parse_flag(raw),
            Field::ReferenceFromBelow => self.reference_from_below = parse_flag(raw),
            Field::Posture => {
                self.posture = match raw.trim() {
                    "standing" => Posture::Standing,
                    _ => Posture::Seated,
                }
            }
            Field::Units => {
                self.units = match raw.trim() {
                    "feet" | "imperial" => UnitSystem::Imperial,
                    _ => UnitSystem::Metric,
                }
            }
        }
    }

    /// Serialize for a form submission. Fields that belong to a switched-off
    /// toggle are left out: the sub distance from center when the LR
    /// configuration is off, and the array depth when positions are not
    /// referenced from below the array. Unset numbers are left out as well.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(11);
        for field in Field::NUMERIC {
            if self.is_excluded(field) {
                continue;
            }
            if let Some(v) = self.number(field) {
                pairs.push((field.query_key(), format_number(v)));
            }
        }
        if self.sub_lr {
            pairs.push((Field::SubLrConfig.query_key(), "on".to_string()));
        }
        if self.reference_from_below {
            pairs.push((Field::ReferenceFromBelow.query_key(), "on".to_string()));
        }
        pairs.push((
            Field::Posture.query_key(),
            match self.posture {
                Posture::Seated => "seated",
                Posture::Standing => "standing",
            }
            .to_string(),
        ));
        pairs.push((
            Field::Units.query_key(),
            match self.units {
                UnitSystem::Metric => "meters",
                UnitSystem::Imperial => "feet",
            }
            .to_string(),
        ));
        pairs
    }

    /// Rebuild from query pairs. Unknown keys are ignored; absent toggles are
    /// off.
    pub fn from_query_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut state = FormState::default();
        for (key, value) in pairs {
            if let Some(field) = Field::from_query_key(key) {
                state.set_raw(field, value);
            }
        }
        state
    }

    fn is_excluded(&self, field: Field) -> bool {
        match field {
            Field::SubCenterDistance => !self.sub_lr,
            Field::ArrayDepth => !self.reference_from_below,
            _ => false,
        }
    }
}

fn format_number(v: f32) -> String {
    if v.fract() == 0.0 && v.abs() < 1e9 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}
