//! Shared UI icons.

use console::Emoji;

pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "[CFG]");
pub static HAMMER: Emoji<'_, '_> = Emoji("🔨 ", "[MAKE]");
pub static BROOM: Emoji<'_, '_> = Emoji("🧹 ", "[CLEAN]");
