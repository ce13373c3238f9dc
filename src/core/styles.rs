//! Style roles for terminal output, expressed as an enum + macro mapping logical
//! names to `colored::Color`.
//!
//! Colouring is applied only when the `enabled` flag passed to `paint()` is true,
//! so no global colour state is needed.
//!
//! ```
//! use envscan::core::styles::StyleRole;
//! assert_eq!(StyleRole::Exposed.paint("secrets", false), "secrets");
//! let colored = StyleRole::Exposed.paint("secrets", true);
//! assert!(colored.starts_with("\x1b[") && colored.ends_with("\x1b[0m"));
//! ```

use clap::builder::styling::AnsiColor;
use colored::Color;

macro_rules! style {
    ( $( $variant:ident => $color:expr ),+ $(,)? ) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub enum StyleRole { $( $variant ),+ }

        impl StyleRole {
            pub fn color(self) -> Option<Color> {
                match self { $( StyleRole::$variant => $color ),+ }
            }
        }
    }
}

style! {
    Header      => Some(Color::Yellow),
    Literal     => Some(Color::Cyan),
    Placeholder => Some(Color::Green),
    Safe        => Some(Color::Green),
    Exposed     => Some(Color::Red),
    Error       => Some(Color::BrightRed),
    Warning     => Some(Color::BrightYellow),
    Link        => Some(Color::Blue),
    Dim         => Some(Color::BrightBlack)
}

impl StyleRole {
    /// SGR parameter for the role's foreground colour
    pub fn ansi_code(self) -> Option<String> {
        self.color().map(|c| c.to_fg_str().into_owned())
    }

    pub fn paint(self, text: &str, enabled: bool) -> String {
        match self.ansi_code() {
            Some(code) if enabled => format!("\x1b[{}m{}\x1b[0m", code, text),
            _ => text.to_string(),
        }
    }

    /// prettytable `style_spec` for the role (`Fr`, `FB`, ...)
    pub fn to_prettytable_spec(self) -> Option<String> {
        let spec_char = match self.color()? {
            Color::Black => 'k',
            Color::Red => 'r',
            Color::Green => 'g',
            Color::Yellow => 'y',
            Color::Blue => 'b',
            Color::Magenta => 'm',
            Color::Cyan => 'c',
            Color::White => 'w',
            Color::BrightBlack => 'K',
            Color::BrightRed => 'R',
            Color::BrightGreen => 'G',
            Color::BrightYellow => 'Y',
            Color::BrightBlue => 'B',
            Color::BrightMagenta => 'M',
            Color::BrightCyan => 'C',
            Color::BrightWhite => 'W',
            Color::TrueColor { .. } => return None,
        };
        Some(format!("F{}", spec_char))
    }

    fn clap_color(self) -> Option<AnsiColor> {
        Some(match self.color()? {
            Color::Black => AnsiColor::Black,
            Color::Red => AnsiColor::Red,
            Color::Green => AnsiColor::Green,
            Color::Yellow => AnsiColor::Yellow,
            Color::Blue => AnsiColor::Blue,
            Color::Magenta => AnsiColor::Magenta,
            Color::Cyan => AnsiColor::Cyan,
            Color::White => AnsiColor::White,
            Color::BrightBlack => AnsiColor::BrightBlack,
            Color::BrightRed => AnsiColor::BrightRed,
            Color::BrightGreen => AnsiColor::BrightGreen,
            Color::BrightYellow => AnsiColor::BrightYellow,
            Color::BrightBlue => AnsiColor::BrightBlue,
            Color::BrightMagenta => AnsiColor::BrightMagenta,
            Color::BrightCyan => AnsiColor::BrightCyan,
            Color::BrightWhite => AnsiColor::BrightWhite,
            Color::TrueColor { .. } => return None,
        })
    }
}

/// Build clap help styles from the same roles
pub fn palette_to_clap(enabled: bool) -> clap::builder::Styles {
    use clap::builder::styling::{Color as ClapColor, Style};
    if !enabled {
        return clap::builder::Styles::plain();
    }

    let style = |role: StyleRole, bold: bool| {
        let mut s = Style::new();
        if let Some(col) = role.clap_color() {
            s = s.fg_color(Some(ClapColor::Ansi(col)));
        }
        if bold {
            s = s.bold();
        }
        s
    };

    clap::builder::Styles::styled()
        .header(style(StyleRole::Header, true))
        .literal(style(StyleRole::Literal, false))
        .placeholder(style(StyleRole::Placeholder, false))
        .valid(style(StyleRole::Safe, false))
        .invalid(style(StyleRole::Exposed, false))
        .error(style(StyleRole::Error, false))
}
