use crate::plotter::error::PlotError;

/// Conversion kinds accepted in a text format string.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Conversion {
    /// `%d`: integer digits, floats truncated toward zero.
    Decimal,
    /// `%s`: natural display form of the value.
    Str,
    /// `%g`: shortest round-trip float display, no trailing `.0`.
    General,
    /// `%f` / `%.Nf`: fixed decimals, six when N is not given.
    Fixed(Option<usize>),
}

/// A parsed label format: literal text around at most one value placeholder.
///
/// `%%` escapes a literal percent sign. A format with no placeholder labels
/// every site with the same literal string.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFormat {
    prefix: String,
    conversion: Option<Conversion>,
    suffix: String,
}

impl TextFormat {
    /// The format used when a text binding gives no format string: bare `%g`.
    pub fn general() -> TextFormat {
        TextFormat {
            prefix: String::new(),
            conversion: Some(Conversion::General),
            suffix: String::new(),
        }
    }

    /// Parses a format string. Supported placeholders: `%d`, `%s`, `%g`,
    /// `%f`, `%.Nf`; at most one per format.
    pub fn parse(format: &str) -> Result<TextFormat, PlotError> {
        let bad = || PlotError::BadFormat(format.to_string());

        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut conversion: Option<Conversion> = None;
        let mut chars = format.chars().peekable();

        while let Some(ch) = chars.next() {
            let literal = if conversion.is_none() {
                &mut prefix
            } else {
                &mut suffix
            };

            if ch != '%' {
                literal.push(ch);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                literal.push('%');
                continue;
            }
            if conversion.is_some() {
                // Only one value is formatted per site
                return Err(bad());
            }

            let mut precision = None;
            if chars.peek() == Some(&'.') {
                chars.next();
                let mut digits = String::new();
                while let Some(digit) = chars.peek().filter(|c| c.is_ascii_digit()) {
                    digits.push(*digit);
                    chars.next();
                }
                precision = Some(digits.parse::<usize>().map_err(|_| bad())?);
            }

            conversion = Some(match chars.next() {
                Some('d') if precision.is_none() => Conversion::Decimal,
                Some('s') if precision.is_none() => Conversion::Str,
                Some('g') if precision.is_none() => Conversion::General,
                Some('f') => Conversion::Fixed(precision),
                _ => return Err(bad()),
            });
        }

        Ok(TextFormat {
            prefix,
            conversion,
            suffix,
        })
    }

    pub fn apply_float(&self, value: f64) -> String {
        let body = match self.conversion {
            None => String::new(),
            Some(Conversion::Decimal) => format!("{}", value.trunc() as i64),
            Some(Conversion::Str) | Some(Conversion::General) => format!("{}", value),
            Some(Conversion::Fixed(precision)) => {
                format!("{:.*}", precision.unwrap_or(6), value)
            }
        };
        format!("{}{}{}", self.prefix, body, self.suffix)
    }

    pub fn apply_int(&self, value: i32) -> String {
        let body = match self.conversion {
            None => String::new(),
            Some(Conversion::Fixed(precision)) => {
                format!("{:.*}", precision.unwrap_or(6), f64::from(value))
            }
            Some(_) => format!("{}", value),
        };
        format!("{}{}{}", self.prefix, body, self.suffix)
    }
}
