use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

pub(crate) fn inside(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

/// Truncates `s` to at most `max` display columns, replacing the head with
/// an ellipsis. Paths are more recognizable by their tail.
pub(crate) fn truncate_left(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut tail: Vec<char> = Vec::new();
    let mut width = 1; // the ellipsis column
    for c in s.chars().rev() {
        let w = c.to_string().width();
        if width + w > max {
            break;
        }
        width += w;
        tail.push(c);
    }
    let mut out = String::from("…");
    out.extend(tail.into_iter().rev());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inside_respects_all_four_edges() {
        let rect = Rect::new(2, 3, 4, 2);
        assert!(inside(rect, 2, 3));
        assert!(inside(rect, 5, 4));
        assert!(!inside(rect, 6, 4));
        assert!(!inside(rect, 1, 3));
        assert!(!inside(rect, 2, 5));
    }

    #[test]
    fn truncate_left_keeps_the_tail() {
        assert_eq!(truncate_left("/home/user/projects", 30), "/home/user/projects");
        assert_eq!(truncate_left("/home/user/projects", 9), "…projects");
        assert_eq!(truncate_left("abc", 0), "");
    }
}
