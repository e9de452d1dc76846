//! Thought balloons.

use std::collections::HashMap;

use super::{CommandId, DispatchContext, Effector, SayMode, VerbOutcome};
use crate::modifier::ModifierChainExt;
use crate::rng::RandomSource;
use crate::state::Color;

pub(super) fn say(
    ctx: &mut DispatchContext<'_>,
    cursors: &mut HashMap<CommandId, usize>,
    effector: &Effector,
) -> VerbOutcome {
    let Some(script) = effector.params.say.as_ref() else {
        return VerbOutcome::supported();
    };
    let border = effector
        .modifiers
        .color_choice()
        .map_or(Color::Black, |choice| choice.pick(ctx.rng));

    let previous = cursors.get(&effector.command).copied().unwrap_or(0);
    let (line, cursor) = pick_line(&script.lines, script.mode, previous, ctx.rng);
    cursors.insert(effector.command, cursor);

    // Only an empty script has nothing to show; an all-blank one still
    // presents its blank line.
    let Some(line) = line else {
        return VerbOutcome::supported();
    };
    if !ctx.host.show_thought_balloon(effector.actor, line, border) {
        tracing::debug!(
            target: "sim_core::verb",
            actor = %effector.actor,
            "thought balloon refused, cursor rolled back"
        );
        cursors.insert(effector.command, previous);
    }
    VerbOutcome::supported()
}

fn is_blank(line: &str) -> bool {
    line.is_empty() || line == "\n"
}

/// Choose the line to show and the cursor to store.
///
/// Sequential mode stores the index after the shown line and skips blanks,
/// wrapping around. Random mode stores the shown index and never repeats it
/// back to back unless there is only one line; a blank pick falls back to a
/// linear scan.
fn pick_line<'a>(
    lines: &'a [String],
    mode: SayMode,
    cursor: usize,
    rng: &mut dyn RandomSource,
) -> (Option<&'a str>, usize) {
    let count = lines.len();
    if count == 0 {
        return (None, cursor);
    }

    let start = match mode {
        SayMode::Sequential => cursor % count,
        SayMode::Random => {
            let mut index = rng.next_below(count as u32) as usize;
            while count > 1 && index == cursor {
                index = rng.next_below(count as u32) as usize;
            }
            if !is_blank(&lines[index]) {
                return (Some(lines[index].as_str()), index);
            }
            index
        }
    };

    let mut index = start;
    let mut line = None;
    for _ in 0..count {
        let candidate = lines[index].as_str();
        index = (index + 1) % count;
        line = Some(candidate);
        if !is_blank(candidate) {
            break;
        }
    }
    (line, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PcgRng;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn sequential_skips_blanks_and_wraps() {
        let script = lines(&["a", "", "b"]);
        let mut rng = PcgRng::seeded(0);

        let (line, cursor) = pick_line(&script, SayMode::Sequential, 0, &mut rng);
        assert_eq!((line, cursor), (Some("a"), 1));

        let (line, cursor) = pick_line(&script, SayMode::Sequential, cursor, &mut rng);
        assert_eq!((line, cursor), (Some("b"), 0));

        let (line, _) = pick_line(&script, SayMode::Sequential, cursor, &mut rng);
        assert_eq!(line, Some("a"));
    }

    #[test]
    fn random_never_repeats_previous_line() {
        let script = lines(&["a", "b", "c"]);
        let mut rng = PcgRng::seeded(5);
        let mut cursor = 0;
        for _ in 0..100 {
            let (_, next) = pick_line(&script, SayMode::Random, cursor, &mut rng);
            assert_ne!(next, cursor);
            cursor = next;
        }
    }

    #[test]
    fn random_single_line_repeats() {
        let script = lines(&["only"]);
        let mut rng = PcgRng::seeded(5);
        let (line, cursor) = pick_line(&script, SayMode::Random, 0, &mut rng);
        assert_eq!((line, cursor), (Some("only"), 0));
    }

    #[test]
    fn all_blank_yields_blank() {
        let script = lines(&["", "\n"]);
        let mut rng = PcgRng::seeded(5);
        let (line, _) = pick_line(&script, SayMode::Sequential, 0, &mut rng);
        assert!(line.is_some_and(is_blank));
    }

    #[test]
    fn empty_script_keeps_cursor() {
        let mut rng = PcgRng::seeded(5);
        assert_eq!(pick_line(&[], SayMode::Random, 3, &mut rng), (None, 3));
    }
}
