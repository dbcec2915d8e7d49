//! Flavor text attached to summaries. Purely decorative.

use rand::rngs::ThreadRng;
use rand::Rng;

pub static MATCH_PHRASES: &[&str] = &[
    "✅ Everything matches. For once.",
    "😌 All receipts balanced. Miracles happen.",
    "👍 Beer and bottles are in sync.",
    "🎯 Perfect match. Even the bottles agree.",
    "😅 No mismatches. I won't get used to this.",
    "🧾 All receipts match. Boring, but correct.",
    "🍺 Counts align. The bottles behaved.",
    "✨ Clean run. Nothing to complain about.",
    "🙃 All matched. I'm almost disappointed.",
    "✅ Balanced. The math did its job.",
    "🟢 No issues. The universe is aligned.",
    "👌 All good. No drama today.",
    "🏁 Done. All receipts are clean.",
    "🧠 Math works today. Shocking.",
    "🟢 All green. Even the decimals behaved.",
    "🍻 Totals match. Raise a glass.",
    "✅ Beer vs bottles: tie game.",
    "😎 Everything matches. I'll allow it.",
];

pub static MISMATCH_PHRASES: &[&str] = &[
    "⚠️ Mismatch detected. Obviously.",
    "😑 The bottles and beer disagree. Again.",
    "🙄 Totals don't match. Shocking.",
    "⚠️ Something's off. The math is unimpressed.",
    "🤦 Bottles and beer can't get along.",
    "⚠️ Discrepancy alert. I did the math.",
    "🧾 Not all receipts match. Surprise.",
    "😒 The numbers are arguing.",
    "🤷 Mismatches found. What did you expect?",
    "😑 The bottles lied.",
    "⚠️ The balance is broken.",
    "😬 Receipts don't line up. Fun.",
    "⚠️ The math is not mathing.",
    "🙄 Something doesn't add up. Literally.",
    "⚠️ The bottles are freelancing.",
];

pub static SNARK_MATCH_PHRASES: &[&str] = &[
    "🎉 Everything matched. I'm almost proud. Almost.",
    "😌 All good. I tried to find a problem. There wasn't one.",
    "😏 Perfect match. Try not to ruin it in the next file.",
    "✅ No mismatches. I checked twice just to be annoyed.",
    "🟢 All green. I'm bored now.",
];

pub static SNARK_MISMATCH_PHRASES: &[&str] = &[
    "🙃 Here we go again. The numbers are doing their own thing.",
    "⚠️ You had one job: make totals match. And yet.",
    "😏 I found mistakes. You're welcome.",
    "😬 The math is screaming quietly in the corner.",
    "🤷 I checked. The totals did not.",
    "😑 The math is fine. The data isn't.",
    "😏 Beer and bottles have trust issues.",
    "🤦 You lost the plot somewhere between liters and bottles.",
    "🙄 If mismatches were a sport, you'd medal.",
    "🙃 The totals took a scenic detour.",
];

/// Chooses which entry of a phrase table to use.
pub trait PhraseSource {
    /// Index in `0..len`; `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform choice from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomPhrases<R = ThreadRng> {
    rng: R,
}

impl RandomPhrases<ThreadRng> {
    pub fn new() -> Self {
        Self { rng: rand::thread_rng() }
    }
}

impl Default for RandomPhrases<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomPhrases<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> PhraseSource for RandomPhrases<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Always the same index (wrapped to the table length).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedPhrase(pub usize);

impl PhraseSource for FixedPhrase {
    fn pick(&mut self, len: usize) -> usize {
        self.0 % len
    }
}

pub fn choose(source: &mut dyn PhraseSource, table: &'static [&'static str]) -> &'static str {
    if table.is_empty() {
        return "";
    }
    table[source.pick(table.len()).min(table.len() - 1)]
}

pub fn match_phrase(source: &mut dyn PhraseSource) -> &'static str {
    choose(source, MATCH_PHRASES)
}

pub fn mismatch_phrase(source: &mut dyn PhraseSource) -> &'static str {
    choose(source, MISMATCH_PHRASES)
}

pub fn snark_phrase(source: &mut dyn PhraseSource, matched: bool) -> &'static str {
    if matched {
        choose(source, SNARK_MATCH_PHRASES)
    } else {
        choose(source, SNARK_MISMATCH_PHRASES)
    }
}
