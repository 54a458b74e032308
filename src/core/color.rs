// src/core/color.rs

use colored::Color;

/// Parses an environment's `Color` hint into a terminal color.
///
/// Accepts plain color names ("red", "cyan") as well as the console color names
/// older launchers stored ("DarkGreen", "Gray", "DarkYellow"). Unknown names yield
/// `None` and the environment is rendered uncolored.
pub fn parse_color_name(name: &str) -> Option<Color> {
    let key: String = name
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .collect::<String>()
        .to_lowercase();

    match key.as_str() {
        "black" => Some(Color::Black),
        "darkblue" => Some(Color::Blue),
        "darkgreen" => Some(Color::Green),
        "darkcyan" => Some(Color::Cyan),
        "darkred" => Some(Color::Red),
        "darkmagenta" => Some(Color::Magenta),
        "darkyellow" => Some(Color::Yellow),
        "gray" | "grey" => Some(Color::White),
        "darkgray" | "darkgrey" => Some(Color::BrightBlack),
        "blue" => Some(Color::BrightBlue),
        "green" => Some(Color::BrightGreen),
        "cyan" => Some(Color::BrightCyan),
        "red" => Some(Color::BrightRed),
        "magenta" => Some(Color::BrightMagenta),
        "yellow" => Some(Color::BrightYellow),
        "white" => Some(Color::BrightWhite),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_color_names() {
        assert_eq!(parse_color_name("DarkGreen"), Some(Color::Green));
        assert_eq!(parse_color_name(" dark_yellow "), Some(Color::Yellow));
        assert_eq!(parse_color_name("Gray"), Some(Color::White));
        assert_eq!(parse_color_name("CYAN"), Some(Color::BrightCyan));
    }

    #[test]
    fn test_unknown_color_is_ignored() {
        assert_eq!(parse_color_name("chartreuse"), None);
        assert_eq!(parse_color_name(""), None);
    }
}
