/*!
 * SDH (Subtitles for the Deaf/Hard-of-hearing) marker handling.
 *
 * Audio descriptions live inside bracket pairs (`[Music plays]`,
 * `（笑声）`) and music cues use note glyphs (`♪♪`). Rather than a regex
 * alternation, stripping is a deterministic sequence of span-removal
 * passes over an explicit table of delimiter pairs plus a glyph set,
 * which can be tested pair by pair.
 */

/// Bracket pairs that delimit audio descriptions, ASCII and full-width
/// CJK variants.
pub const BRACKET_PAIRS: [(char, char); 9] = [
    ('[', ']'),
    ('(', ')'),
    ('（', '）'),
    ('【', '】'),
    ('《', '》'),
    ('［', '］'),
    ('〔', '〕'),
    ('〈', '〉'),
    ('「', '」'),
];

/// Music cue glyphs removed wholesale.
pub const MUSIC_GLYPHS: [char; 3] = ['♪', '🎵', '🎶'];

/// Remove every bracket-delimited span and music glyph from a line.
///
/// Each bracket pair is applied as its own pass; an unmatched open
/// delimiter is left in place rather than eating the rest of the line.
pub fn strip_sdh_spans(line: &str) -> String {
    let mut text: String = line
        .chars()
        .filter(|c| !MUSIC_GLYPHS.contains(c))
        .collect();

    for &(open, close) in BRACKET_PAIRS.iter() {
        text = remove_delimited_spans(&text, open, close);
    }

    text
}

// One span-removal pass for a single delimiter pair. Spans do not nest in
// subtitle cues; the first close after an open terminates the span.
fn remove_delimited_spans(text: &str, open: char, close: char) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != open {
            result.push(c);
            continue;
        }

        // Collect until the matching close; restore everything if the
        // span never terminates.
        let mut span = String::new();
        span.push(c);
        let mut closed = false;
        for inner in chars.by_ref() {
            span.push(inner);
            if inner == close {
                closed = true;
                break;
            }
        }

        if !closed {
            result.push_str(&span);
        }
    }

    result
}

/// Clean a single line: strip SDH spans, squeeze whitespace, renormalize
/// the dialogue dash to `"- "`. A line reduced to a bare dash becomes
/// empty.
pub fn clean_line(line: &str) -> String {
    let stripped = strip_sdh_spans(line);

    // Squeeze runs of whitespace to single spaces
    let squeezed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    // Renormalize dialogue markers, including doubled dashes that appear
    // when a span between two dashes was removed ("- - text").
    let mut rest = squeezed.as_str();
    let mut had_dash = false;
    loop {
        let trimmed = rest.trim_start();
        if let Some(after) = trimmed.strip_prefix('-') {
            had_dash = true;
            rest = after;
        } else {
            rest = trimmed;
            break;
        }
    }

    let content = rest.trim();
    if content.is_empty() {
        // Bare dash (or nothing) left over
        String::new()
    } else if had_dash {
        format!("- {}", content)
    } else {
        content.to_string()
    }
}

/// True when the line carries no dialogue once SDH markers and a leading
/// dialogue dash are removed.
pub fn is_sdh_only_line(line: &str) -> bool {
    let stripped = strip_sdh_spans(line);
    let without_dash = stripped.trim_start().strip_prefix('-').unwrap_or(&stripped);
    without_dash.trim().is_empty()
}

/// True when a non-empty set of lines contains only SDH content.
pub fn is_sdh_only_block(lines: &[String]) -> bool {
    let has_content = lines.iter().any(|line| !line.trim().is_empty());
    if !has_content {
        return false;
    }

    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .all(|line| is_sdh_only_line(line))
}

/// True when the line carries any SDH marker at all (glyph or bracketed
/// span), regardless of surrounding dialogue.
pub fn has_sdh_marker(line: &str) -> bool {
    if line.chars().any(|c| MUSIC_GLYPHS.contains(&c)) {
        return true;
    }

    BRACKET_PAIRS.iter().any(|&(open, close)| {
        line.find(open)
            .and_then(|start| line[start..].find(close))
            .is_some()
    })
}
