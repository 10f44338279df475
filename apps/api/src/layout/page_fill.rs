//! Page fill analysis: how much of the single preview page the content uses.
//!
//! The preview never shrinks or truncates text to make it fit. Instead the
//! renderer reports the fill so the client can warn the user.
//!
//! # Page fill rules
//! - Whitespace > 8%  → page looks sparse, suggest adding content
//! - Overflow ≤ 5%    → tighten wording
//! - Overflow > 5%    → remove content; the tail is clipped in the preview

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Overall page fill verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFillVerdict {
    /// 92–100% fill: acceptable range.
    Acceptable,
    /// < 92% fill (> 8% whitespace).
    TooMuchWhitespace,
    /// 100–105% fill: the last lines are clipped.
    MinorOverflow,
    /// > 105% fill: whole entries are clipped.
    MajorOverflow,
}

impl PageFillVerdict {
    pub fn overflows(&self) -> bool {
        matches!(
            self,
            PageFillVerdict::MinorOverflow | PageFillVerdict::MajorOverflow
        )
    }
}

/// Full page fill analysis result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFillAnalysis {
    pub used_height_pt: f32,
    pub available_height_pt: f32,
    pub whitespace_fraction: f32,
    pub overflow_fraction: f32,
    pub verdict: PageFillVerdict,
}

/// What the user could do about the current fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillAdvice {
    NoAction,
    AddContent,
    TightenWording,
    RemoveContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Analyzes page fill from the tallest column's used height.
pub fn analyze_page_fill(used_height_pt: f32, available_height_pt: f32) -> PageFillAnalysis {
    let fill_ratio = if available_height_pt > 0.0 {
        used_height_pt / available_height_pt
    } else {
        0.0
    };

    let whitespace_fraction = (1.0_f32 - fill_ratio).max(0.0);
    let overflow_fraction = (fill_ratio - 1.0_f32).max(0.0);

    let verdict = if fill_ratio > 1.05 {
        PageFillVerdict::MajorOverflow
    } else if fill_ratio > 1.00 {
        PageFillVerdict::MinorOverflow
    } else if whitespace_fraction > 0.08 {
        PageFillVerdict::TooMuchWhitespace
    } else {
        PageFillVerdict::Acceptable
    };

    PageFillAnalysis {
        used_height_pt,
        available_height_pt,
        whitespace_fraction,
        overflow_fraction,
        verdict,
    }
}

pub fn recommend_fill_action(analysis: &PageFillAnalysis) -> FillAdvice {
    match analysis.verdict {
        PageFillVerdict::Acceptable => FillAdvice::NoAction,
        PageFillVerdict::TooMuchWhitespace => FillAdvice::AddContent,
        PageFillVerdict::MinorOverflow => FillAdvice::TightenWording,
        PageFillVerdict::MajorOverflow => FillAdvice::RemoveContent,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
