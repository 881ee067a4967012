//! Unit tests for SourceInfo capture and rendering

use var_core::SourceInfo;

#[cfg(test)]
mod capture_tests {
    use super::*;

    const SOURCE: &str = "func main() {\n\tvar x = blabla;\n\treturn x;\n}\n";

    #[test]
    fn test_capture_middle_line() {
        let info = SourceInfo::capture("main.vr", SOURCE, (2, 10), 6, "main");
        assert_eq!(info.line_before, "func main() {");
        assert_eq!(info.line_str, "\tvar x = blabla;");
        assert_eq!(info.line_after, "\treturn x;");
        assert_eq!(info.function, "main");
    }

    #[test]
    fn test_capture_last_line_has_no_line_after() {
        let info = SourceInfo::capture("main.vr", "a\nb", (2, 1), 1, "");
        assert_eq!(info.line_before, "a");
        assert_eq!(info.line_str, "b");
        assert!(info.line_after.is_empty());
    }

    #[test]
    fn test_capture_past_end_is_empty() {
        let info = SourceInfo::capture("main.vr", "only", (5, 1), 1, "");
        assert!(info.line_str.is_empty());
        assert!(info.line_before.is_empty());
    }
}

#[cfg(test)]
mod caret_tests {
    use super::*;

    #[test]
    fn test_six_carets_at_column_nine() {
        let info = SourceInfo::capture("main.vr", "var x = blabla;", (1, 9), 6, "main");
        assert_eq!(info.caret_line(), "        ^^^^^^");
    }

    #[test]
    fn test_caret_keeps_tabs() {
        let info = SourceInfo::capture("main.vr", "\t\tx", (1, 3), 1, "");
        assert_eq!(info.caret_line(), "\t\t^");
    }

    #[test]
    fn test_column_past_line_end() {
        let info = SourceInfo::capture("main.vr", "ab", (1, 10), 4, "");
        assert_eq!(info.caret_line(), "  ^");
    }
}

#[cfg(test)]
mod render_tests {
    use super::*;

    #[test]
    fn test_render_with_snippet() {
        let info = SourceInfo::capture("main.vr", "var x = blabla;", (1, 9), 6, "main");
        let rendered = info.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "  at main.vr:1:9 in main");
        assert_eq!(lines[1], "var x = blabla;");
        assert_eq!(lines[2], "        ^^^^^^");
    }

    #[test]
    fn test_render_location_only() {
        let info = SourceInfo::at("lib.vr", 12, "");
        assert_eq!(info.render(), "  at lib.vr:12");
    }
}
