//! Bounded controls: named inputs with a fixed legal domain.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{PanelError, ValidationError};

/// Stable identifier of a control on the page, e.g. "s3_compl".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ControlId(pub String);

impl ControlId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Slack allowed when checking that a value sits on the step grid.
const STEP_TOLERANCE: f64 = 1e-9;

/// Legal domain of a control.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlDomain {
    /// Closed numeric interval walked in `step` increments (slider).
    Range { min: f64, max: f64, step: f64 },
    /// Declared option labels (select).
    Labels(Vec<String>),
}

impl ControlDomain {
    /// Check that `value` belongs to this domain.
    pub fn admits(&self, value: &ControlValue) -> Result<(), ValidationError> {
        match (self, value) {
            (ControlDomain::Range { min, max, step }, ControlValue::Number(n)) => {
                if !n.is_finite() {
                    return Err(ValidationError::NonFinite);
                }
                if *n < *min || *n > *max {
                    return Err(ValidationError::OutOfRange {
                        value: *n,
                        min: *min,
                        max: *max,
                    });
                }
                if *step > 0.0 {
                    let k = (*n - *min) / *step;
                    if (k - k.round()).abs() > STEP_TOLERANCE {
                        return Err(ValidationError::OffStep {
                            value: *n,
                            step: *step,
                        });
                    }
                }
                Ok(())
            }
            (ControlDomain::Labels(labels), ControlValue::Label(l)) => {
                if labels.iter().any(|x| x == l) {
                    Ok(())
                } else {
                    Err(ValidationError::UndeclaredLabel(l.clone()))
                }
            }
            (ControlDomain::Range { .. }, ControlValue::Label(_)) => {
                Err(ValidationError::KindMismatch { expected: "number" })
            }
            (ControlDomain::Labels(_), ControlValue::Number(_)) => {
                Err(ValidationError::KindMismatch { expected: "label" })
            }
        }
    }

    /// Parse raw widget text into a value of this domain's kind (not yet validated).
    pub fn parse(&self, raw: &str) -> Result<ControlValue, ValidationError> {
        match self {
            ControlDomain::Range { .. } => raw
                .trim()
                .parse::<f64>()
                .map(ControlValue::Number)
                .map_err(|_| ValidationError::KindMismatch { expected: "number" }),
            ControlDomain::Labels(_) => Ok(ControlValue::Label(raw.trim().to_string())),
        }
    }
}

/// Current value of a control.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlValue {
    Number(f64),
    Label(String),
}

impl ControlValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ControlValue::Number(n) => Some(*n),
            ControlValue::Label(_) => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            ControlValue::Label(l) => Some(l),
            ControlValue::Number(_) => None,
        }
    }
}

impl From<f64> for ControlValue {
    fn from(n: f64) -> Self {
        ControlValue::Number(n)
    }
}

impl From<&str> for ControlValue {
    fn from(l: &str) -> Self {
        ControlValue::Label(l.to_string())
    }
}

/// A named input whose value always lies within its domain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundedControl {
    id: ControlId,
    domain: ControlDomain,
    value: ControlValue,
}

impl BoundedControl {
    /// Slider over `[min, max]` with unit step.
    pub fn numeric(id: &str, min: f64, max: f64, default: f64) -> Result<Self, ValidationError> {
        if !(min.is_finite() && max.is_finite()) {
            return Err(ValidationError::NonFinite);
        }
        if min > max {
            return Err(ValidationError::InvertedRange { min, max });
        }
        Self::with_domain(
            id,
            ControlDomain::Range {
                min,
                max,
                step: 1.0,
            },
            ControlValue::Number(default),
        )
    }

    /// Select over the given labels.
    pub fn select(id: &str, labels: &[&str], default: &str) -> Result<Self, ValidationError> {
        if labels.is_empty() {
            return Err(ValidationError::EmptyDomain);
        }
        Self::with_domain(
            id,
            ControlDomain::Labels(labels.iter().map(|l| l.to_string()).collect()),
            ControlValue::Label(default.to_string()),
        )
    }

    fn with_domain(
        id: &str,
        domain: ControlDomain,
        value: ControlValue,
    ) -> Result<Self, ValidationError> {
        domain.admits(&value)?;
        Ok(Self {
            id: ControlId::new(id),
            domain,
            value,
        })
    }

    pub fn id(&self) -> &ControlId {
        &self.id
    }

    pub fn domain(&self) -> &ControlDomain {
        &self.domain
    }

    /// Current value, guaranteed within the domain.
    pub fn read(&self) -> &ControlValue {
        &self.value
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.domain, ControlDomain::Range { .. })
    }

    /// Commit a new value. Returns whether the stored value changed.
    pub fn commit(&mut self, value: ControlValue) -> Result<bool, ValidationError> {
        self.domain.admits(&value)?;
        let changed = self.value != value;
        trace!(control = %self.id, ?value, changed, "control commit");
        self.value = value;
        Ok(changed)
    }

    /// Textual mirror of a numeric slider for its value label.
    pub fn echo(&self) -> Option<String> {
        match (&self.domain, &self.value) {
            (ControlDomain::Range { .. }, ControlValue::Number(n)) => Some(format_number(*n)),
            _ => None,
        }
    }
}

/// Prints integral values without a fractional part, as a slider label does.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// The ordered controls belonging to one panel.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlSet {
    controls: Vec<BoundedControl>,
}

impl ControlSet {
    pub fn new(controls: Vec<BoundedControl>) -> Self {
        Self { controls }
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoundedControl> {
        self.controls.iter()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&BoundedControl> {
        self.controls.iter().find(|c| c.id.as_str() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut BoundedControl> {
        self.controls.iter_mut().find(|c| c.id.as_str() == id)
    }

    /// Numeric value of control `id`.
    pub fn number(&self, id: &str) -> Result<f64, PanelError> {
        let c = self
            .get(id)
            .ok_or_else(|| PanelError::UnknownControl(id.to_string()))?;
        c.read()
            .as_number()
            .ok_or(PanelError::Validation(ValidationError::KindMismatch {
                expected: "number",
            }))
    }

    /// Selected label of control `id`.
    pub fn label(&self, id: &str) -> Result<&str, PanelError> {
        let c = self
            .get(id)
            .ok_or_else(|| PanelError::UnknownControl(id.to_string()))?;
        c.read()
            .as_label()
            .ok_or(PanelError::Validation(ValidationError::KindMismatch {
                expected: "label",
            }))
    }

    /// Numeric values of several controls, in the given order.
    pub fn numbers<const N: usize>(&self, ids: [&str; N]) -> Result<[f64; N], PanelError> {
        let mut out = [0.0; N];
        for (slot, id) in out.iter_mut().zip(ids) {
            *slot = self.number(id)?;
        }
        Ok(out)
    }
}
