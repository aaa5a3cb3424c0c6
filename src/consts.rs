//! Default numeric tunables for the page components.

// ── Scroll reveal ───────────────────────────────────────────────

/// Fraction of a `.reveal` element that must be visible before it activates.
pub const REVEAL_THRESHOLD: f64 = 0.1;

// ── Back to top ─────────────────────────────────────────────────

/// Vertical scroll offset in CSS pixels above which the button is shown.
/// The comparison is strict: exactly this offset still hides it.
pub const BACK_TO_TOP_OFFSET_PX: f64 = 300.0;

// ── Staggered animation ─────────────────────────────────────────

/// Animation delay added per project card, in milliseconds.
pub const CARD_DELAY_STEP_MS: u32 = 100;

/// Animation delay added per word of a word-reveal target, in milliseconds.
pub const WORD_DELAY_STEP_MS: u32 = 50;

/// Right margin applied to every generated word span.
pub const WORD_MARGIN_RIGHT: &str = "5px";

// ── Skill bars ──────────────────────────────────────────────────

/// Fraction of a skill item that must be visible before its bar fills.
pub const SKILL_THRESHOLD: f64 = 0.35;

/// Negative bottom margin narrowing the skill trigger zone.
pub const SKILL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Delay between skill bars reported in the same intersection batch, in milliseconds.
pub const SKILL_DELAY_STEP_MS: u32 = 200;
