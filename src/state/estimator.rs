//! Outcome estimator driven by the two sliders

pub const EVIDENCE_RANGE: (u8, u8) = (10, 100);
pub const RESPONSE_HOURS_RANGE: (u8, u8) = (12, 72);

/// Slider positions, always within their ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderInputs {
    evidence_confidence: u8,
    merchant_response_hours: u8,
}

impl SliderInputs {
    pub fn new(evidence_confidence: u8, merchant_response_hours: u8) -> Self {
        Self {
            evidence_confidence: evidence_confidence.clamp(EVIDENCE_RANGE.0, EVIDENCE_RANGE.1),
            merchant_response_hours: merchant_response_hours
                .clamp(RESPONSE_HOURS_RANGE.0, RESPONSE_HOURS_RANGE.1),
        }
    }

    pub fn evidence_confidence(&self) -> u8 {
        self.evidence_confidence
    }

    pub fn merchant_response_hours(&self) -> u8 {
        self.merchant_response_hours
    }

    pub fn nudge_evidence(&mut self, delta: i16) {
        *self = Self::new(
            shift(self.evidence_confidence, delta),
            self.merchant_response_hours,
        );
    }

    pub fn nudge_response_hours(&mut self, delta: i16) {
        *self = Self::new(
            self.evidence_confidence,
            shift(self.merchant_response_hours, delta),
        );
    }

    /// Derived estimates; recomputed on every call
    pub fn estimate(&self) -> EstimatorOutputs {
        estimate(*self)
    }
}

impl Default for SliderInputs {
    fn default() -> Self {
        Self::new(60, 36)
    }
}

fn shift(value: u8, delta: i16) -> u8 {
    (i16::from(value) + delta).clamp(0, i16::from(u8::MAX)) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimatorOutputs {
    pub resolution_days: u8,
    pub approval_probability: u8,
    pub expedite_score: u8,
}

fn bounded(value: f64, min: u8, max: u8) -> u8 {
    value.round().clamp(f64::from(min), f64::from(max)) as u8
}

/// Fixed heuristics mapping slider inputs to display estimates
pub fn estimate(inputs: SliderInputs) -> EstimatorOutputs {
    let confidence = f64::from(inputs.evidence_confidence);
    let hours = f64::from(inputs.merchant_response_hours);
    let response_modifier = 1.0 - (hours / 72.0).min(1.0);

    EstimatorOutputs {
        resolution_days: bounded(
            12.0 - (confidence / 100.0) * 5.0 - response_modifier * 4.0,
            2,
            14,
        ),
        approval_probability: bounded(
            45.0 + (confidence / 100.0) * 40.0 + response_modifier * 8.0,
            24,
            96,
        ),
        expedite_score: bounded(confidence * 0.55 + response_modifier * 45.0, 10, 100),
    }
}
