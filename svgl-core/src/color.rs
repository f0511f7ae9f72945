//! RGB colors: CSS names, hex parsing and display strings.
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    combinator::{all_consuming, map, map_res},
    sequence::{preceded, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SvglError};

/// An RGB triple with channels nominally in [0, 255].
///
/// Channels are kept as floats so that light contributions can be summed
/// without rounding; [`Rgb::clamped`] and the string formatters bring them
/// back into the displayable range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(255.0, 255.0, 255.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB` (case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self> {
        all_consuming(hex_color)(hex)
            .map(|(_, rgb)| rgb)
            .map_err(|_| SvglError::InvalidColor(hex.to_string()))
    }

    /// Look up a CSS color name such as `"steelblue"`.
    pub fn named(name: &str) -> Option<Self> {
        named_hex(name).map(Self::from_packed)
    }

    fn from_packed(packed: u32) -> Self {
        Self::new(
            ((packed >> 16) & 0xFF) as f32,
            ((packed >> 8) & 0xFF) as f32,
            (packed & 0xFF) as f32,
        )
    }

    /// Each channel clamped to [0, 255]. NaN becomes 0.
    pub fn clamped(self) -> Self {
        Self::new(clamp_channel(self.r), clamp_channel(self.g), clamp_channel(self.b))
    }

    fn channels_u8(self) -> [u8; 3] {
        let c = self.clamped();
        [c.r.round() as u8, c.g.round() as u8, c.b.round() as u8]
    }

    /// `#rrggbb`, channels clamped and rounded.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.channels_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// `rgb(r, g, b)` as used in SVG style attributes, channels clamped and rounded.
    pub fn to_css(self) -> String {
        let [r, g, b] = self.channels_u8();
        format!("rgb({r}, {g}, {b})")
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0] as f32, c[1] as f32, c[2] as f32)
    }
}

impl Add for Rgb {
    type Output = Rgb;

    fn add(self, rhs: Rgb) -> Rgb {
        Rgb::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Rgb {
    fn add_assign(&mut self, rhs: Rgb) {
        *self = *self + rhs;
    }
}

/// Accepts a CSS color name or a hex string.
impl FromStr for Rgb {
    type Err = SvglError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return Self::from_hex(s);
        }
        Self::named(&s.to_ascii_lowercase()).ok_or_else(|| SvglError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Rgb {
    type Error = SvglError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> String {
        c.to_hex()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

fn hex_channel(width: usize) -> impl Fn(&str) -> IResult<&str, u8> {
    move |input: &str| {
        map_res(
            take_while_m_n(width, width, |c: char| c.is_ascii_hexdigit()),
            move |digits: &str| {
                if width == 1 {
                    u8::from_str_radix(&digits.repeat(2), 16)
                } else {
                    u8::from_str_radix(digits, 16)
                }
            },
        )(input)
    }
}

fn hex_color(input: &str) -> IResult<&str, Rgb> {
    preceded(
        tag("#"),
        map(
            alt((
                tuple((hex_channel(2), hex_channel(2), hex_channel(2))),
                tuple((hex_channel(1), hex_channel(1), hex_channel(1))),
            )),
            |(r, g, b)| Rgb::from([r, g, b]),
        ),
    )(input)
}

/// Look up a CSS color name, see [`Rgb::named`].
fn clamp_channel(c: f32) -> f32 {
    if c.is_nan() {
        0.0
    } else {
        c.clamp(0.0, 255.0)
    }
}

pub fn named(name: &str) -> Option<Rgb> {
    Rgb::named(name)
}

/// CSS color name to its packed `0xRRGGBB` value.
pub fn named_hex(name: &str) -> Option<u32> {
    NAMED_COLORS
        .binary_search_by(|(n, _)| n.cmp(&name))
        .ok()
        .map(|i| NAMED_COLORS[i].1)
}

// Sorted by name for binary search.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("aliceblue", 0xF0F8FF),
    ("antiquewhite", 0xFAEBD7),
    ("aqua", 0x00FFFF),
    ("aquamarine", 0x7FFFD4),
    ("azure", 0xF0FFFF),
    ("beige", 0xF5F5DC),
    ("bisque", 0xFFE4C4),
    ("black", 0x000000),
    ("blanchedalmond", 0xFFEBCD),
    ("blue", 0x0000FF),
    ("blueviolet", 0x8A2BE2),
    ("brown", 0xA52A2A),
    ("burlywood", 0xDEB887),
    ("cadetblue", 0x5F9EA0),
    ("chartreuse", 0x7FFF00),
    ("chocolate", 0xD2691E),
    ("coral", 0xFF7F50),
    ("cornflowerblue", 0x6495ED),
    ("cornsilk", 0xFFF8DC),
    ("crimson", 0xDC143C),
    ("cyan", 0x00FFFF),
    ("darkblue", 0x00008B),
    ("darkcyan", 0x008B8B),
    ("darkgoldenrod", 0xB8860B),
    ("darkgray", 0xA9A9A9),
    ("darkgreen", 0x006400),
    ("darkgrey", 0xA9A9A9),
    ("darkkhaki", 0xBDB76B),
    ("darkmagenta", 0x8B008B),
    ("darkolivegreen", 0x556B2F),
    ("darkorange", 0xFF8C00),
    ("darkorchid", 0x9932CC),
    ("darkred", 0x8B0000),
    ("darksalmon", 0xE9967A),
    ("darkseagreen", 0x8FBC8F),
    ("darkslateblue", 0x483D8B),
    ("darkslategray", 0x2F4F4F),
    ("darkslategrey", 0x2F4F4F),
    ("darkturquoise", 0x00CED1),
    ("darkviolet", 0x9400D3),
    ("deeppink", 0xFF1493),
    ("deepskyblue", 0x00BFFF),
    ("dimgray", 0x696969),
    ("dimgrey", 0x696969),
    ("dodgerblue", 0x1E90FF),
    ("firebrick", 0xB22222),
    ("floralwhite", 0xFFFAF0),
    ("forestgreen", 0x228B22),
    ("fuchsia", 0xFF00FF),
    ("gainsboro", 0xDCDCDC),
    ("ghostwhite", 0xF8F8FF),
    ("gold", 0xFFD700),
    ("goldenrod", 0xDAA520),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("greenyellow", 0xADFF2F),
    ("grey", 0x808080),
    ("honeydew", 0xF0FFF0),
    ("hotpink", 0xFF69B4),
    ("indianred", 0xCD5C5C),
    ("indigo", 0x4B0082),
    ("ivory", 0xFFFFF0),
    ("khaki", 0xF0E68C),
    ("lavender", 0xE6E6FA),
    ("lavenderblush", 0xFFF0F5),
    ("lawngreen", 0x7CFC00),
    ("lemonchiffon", 0xFFFACD),
    ("lightblue", 0xADD8E6),
    ("lightcoral", 0xF08080),
    ("lightcyan", 0xE0FFFF),
    ("lightgoldenrodyellow", 0xFAFAD2),
    ("lightgray", 0xD3D3D3),
    ("lightgreen", 0x90EE90),
    ("lightgrey", 0xD3D3D3),
    ("lightpink", 0xFFB6C1),
    ("lightsalmon", 0xFFA07A),
    ("lightseagreen", 0x20B2AA),
    ("lightskyblue", 0x87CEFA),
    ("lightslategray", 0x778899),
    ("lightslategrey", 0x778899),
    ("lightsteelblue", 0xB0C4DE),
    ("lightyellow", 0xFFFFE0),
    ("lime", 0x00FF00),
    ("limegreen", 0x32CD32),
    ("linen", 0xFAF0E6),
    ("magenta", 0xFF00FF),
    ("maroon", 0x800000),
    ("mediumaquamarine", 0x66CDAA),
    ("mediumblue", 0x0000CD),
    ("mediumorchid", 0xBA55D3),
    ("mediumpurple", 0x9370DB),
    ("mediumseagreen", 0x3CB371),
    ("mediumslateblue", 0x7B68EE),
    ("mediumspringgreen", 0x00FA9A),
    ("mediumturquoise", 0x48D1CC),
    ("mediumvioletred", 0xC71585),
    ("midnightblue", 0x191970),
    ("mintcream", 0xF5FFFA),
    ("mistyrose", 0xFFE4E1),
    ("moccasin", 0xFFE4B5),
    ("navajowhite", 0xFFDEAD),
    ("navy", 0x000080),
    ("oldlace", 0xFDF5E6),
    ("olive", 0x808000),
    ("olivedrab", 0x6B8E23),
    ("orange", 0xFFA500),
    ("orangered", 0xFF4500),
    ("orchid", 0xDA70D6),
    ("palegoldenrod", 0xEEE8AA),
    ("palegreen", 0x98FB98),
    ("paleturquoise", 0xAFEEEE),
    ("palevioletred", 0xDB7093),
    ("papayawhip", 0xFFEFD5),
    ("peachpuff", 0xFFDAB9),
    ("peru", 0xCD853F),
    ("pink", 0xFFC0CB),
    ("plum", 0xDDA0DD),
    ("powderblue", 0xB0E0E6),
    ("purple", 0x800080),
    ("rebeccapurple", 0x663399),
    ("red", 0xFF0000),
    ("rosybrown", 0xBC8F8F),
    ("royalblue", 0x4169E1),
    ("saddlebrown", 0x8B4513),
    ("salmon", 0xFA8072),
    ("sandybrown", 0xF4A460),
    ("seagreen", 0x2E8B57),
    ("seashell", 0xFFF5EE),
    ("sienna", 0xA0522D),
    ("silver", 0xC0C0C0),
    ("skyblue", 0x87CEEB),
    ("slateblue", 0x6A5ACD),
    ("slategray", 0x708090),
    ("slategrey", 0x708090),
    ("snow", 0xFFFAFA),
    ("springgreen", 0x00FF7F),
    ("steelblue", 0x4682B4),
    ("tan", 0xD2B48C),
    ("teal", 0x008080),
    ("thistle", 0xD8BFD8),
    ("tomato", 0xFF6347),
    ("turquoise", 0x40E0D0),
    ("violet", 0xEE82EE),
    ("wheat", 0xF5DEB3),
    ("white", 0xFFFFFF),
    ("whitesmoke", 0xF5F5F5),
    ("yellow", 0xFFFF00),
    ("yellowgreen", 0x9ACD32),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_table_is_sorted() {
        assert!(NAMED_COLORS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_hex_short_and_long() {
        assert_eq!(Rgb::from_hex("#F61").unwrap(), Rgb::from([0xFF, 0x66, 0x11]));
        assert_eq!(Rgb::from_hex("#ff6611").unwrap(), Rgb::from([0xFF, 0x66, 0x11]));
    }

    #[test]
    fn test_hex_rejects_garbage() {
        assert!(Rgb::from_hex("#12").is_err());
        assert!(Rgb::from_hex("#1234").is_err());
        assert!(Rgb::from_hex("#GGGGGG").is_err());
        assert!(Rgb::from_hex("123456").is_err());
    }

    #[test]
    fn test_from_str_names_and_hex() {
        assert_eq!("red".parse::<Rgb>().unwrap(), Rgb::new(255.0, 0.0, 0.0));
        assert_eq!("SteelBlue".parse::<Rgb>().unwrap(), Rgb::from([0x46, 0x82, 0xB4]));
        assert_eq!("#000".parse::<Rgb>().unwrap(), Rgb::BLACK);
        assert!("not-a-color".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_css_and_hex_output_clamp() {
        let c = Rgb::new(300.0, -4.0, 127.6);
        assert_eq!(c.to_css(), "rgb(255, 0, 128)");
        assert_eq!(c.to_hex(), "#ff0080");
    }

    #[test]
    fn test_clamped_maps_nan_to_zero() {
        let c = Rgb::new(f32::NAN, 400.0, f32::NEG_INFINITY).clamped();
        assert_eq!(c, Rgb::new(0.0, 255.0, 0.0));
    }

    #[test]
    fn test_add_assign() {
        let mut c = Rgb::new(10.0, 20.0, 30.0);
        c += Rgb::new(1.0, 2.0, 3.0);
        assert_eq!(c, Rgb::new(11.0, 22.0, 33.0));
    }
}
