//! SVG path data (`d` attribute) parsing.
//!
//! Commands are resolved to absolute coordinates while parsing: relative
//! forms are offset by the current point, `H`/`V` become lines and `S`
//! becomes a cubic with its first control point reflected from the previous
//! segment.

use crate::loading::IngestionError;
use crate::model::VectorPoint;

/// Absolute drawing instruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(VectorPoint),
    LineTo(VectorPoint),
    CubicTo {
        c1: VectorPoint,
        c2: VectorPoint,
        to: VectorPoint,
    },
    ClosePath,
}

/// Parses SVG path data into absolute commands.
///
/// # Errors
///
/// [`IngestionError::UnsupportedCurve`] for quadratic and arc commands,
/// [`IngestionError::Malformed`] for anything that is not valid path data.
pub fn parse_path_data(data: &str) -> Result<Vec<PathCommand>, IngestionError> {
    PathParser::new(data).run()
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn skip_separators(&mut self) {
        while let Some(byte) = self.peek() {
            if byte.is_ascii_whitespace() || byte == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn at_number(&mut self) -> bool {
        self.skip_separators();
        matches!(self.peek(), Some(b'0'..=b'9' | b'+' | b'-' | b'.'))
    }

    fn next_command(&mut self) -> Option<(char, usize)> {
        self.skip_separators();
        let position = self.pos;
        let command = self.src[position..].chars().next()?;
        self.pos += command.len_utf8();
        Some((command, position))
    }

    fn number(&mut self) -> Result<f64, IngestionError> {
        self.skip_separators();
        let bytes = self.src.as_bytes();
        let start = self.pos;
        let mut end = start;

        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let int_digits = digits_at(bytes, end);
        end += int_digits;

        let mut frac_digits = 0;
        if bytes.get(end) == Some(&b'.') {
            frac_digits = digits_at(bytes, end + 1);
            end += 1 + frac_digits;
        }

        if int_digits + frac_digits == 0 {
            return Err(IngestionError::Malformed {
                position: start,
                reason: "expected a number".to_string(),
            });
        }

        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exponent = end + 1;
            if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
                exponent += 1;
            }
            let exponent_digits = digits_at(bytes, exponent);
            if exponent_digits > 0 {
                end = exponent + exponent_digits;
            }
        }

        self.pos = end;
        self.src[start..end]
            .parse()
            .map_err(|_| IngestionError::Malformed {
                position: start,
                reason: format!("invalid number '{}'", &self.src[start..end]),
            })
    }
}

fn digits_at(bytes: &[u8], from: usize) -> usize {
    bytes
        .get(from..)
        .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
}

struct PathParser<'a> {
    lexer: Lexer<'a>,
    commands: Vec<PathCommand>,
    current: VectorPoint,
    subpath_start: VectorPoint,
    // second control point of the previous cubic, for `S`
    last_control: Option<VectorPoint>,
}

impl<'a> PathParser<'a> {
    fn new(data: &'a str) -> Self {
        let origin = VectorPoint::new(0.0, 0.0);
        Self {
            lexer: Lexer::new(data),
            commands: Vec::new(),
            current: origin,
            subpath_start: origin,
            last_control: None,
        }
    }

    fn run(mut self) -> Result<Vec<PathCommand>, IngestionError> {
        while let Some((command, position)) = self.lexer.next_command() {
            if self.commands.is_empty() && !matches!(command, 'M' | 'm') {
                return Err(IngestionError::Malformed {
                    position,
                    reason: format!("path data must start with a move, found '{command}'"),
                });
            }

            let relative = command.is_ascii_lowercase();
            match command.to_ascii_uppercase() {
                'M' => {
                    let to = self.point(relative)?;
                    self.move_to(to);
                    // extra coordinate pairs after a move are implicit lines
                    while self.lexer.at_number() {
                        let to = self.point(relative)?;
                        self.line_to(to);
                    }
                }
                'L' => self.repeated(|parser| {
                    let to = parser.point(relative)?;
                    parser.line_to(to);
                    Ok(())
                })?,
                'H' => self.repeated(|parser| {
                    let mut x = parser.lexer.number()?;
                    if relative {
                        x += parser.current.x();
                    }
                    let y = parser.current.y();
                    parser.line_to(VectorPoint::new(x, y));
                    Ok(())
                })?,
                'V' => self.repeated(|parser| {
                    let mut y = parser.lexer.number()?;
                    if relative {
                        y += parser.current.y();
                    }
                    let x = parser.current.x();
                    parser.line_to(VectorPoint::new(x, y));
                    Ok(())
                })?,
                'C' => self.repeated(|parser| {
                    let c1 = parser.point(relative)?;
                    let c2 = parser.point(relative)?;
                    let to = parser.point(relative)?;
                    parser.cubic_to(c1, c2, to);
                    Ok(())
                })?,
                'S' => self.repeated(|parser| {
                    let c1 = parser.reflected_control();
                    let c2 = parser.point(relative)?;
                    let to = parser.point(relative)?;
                    parser.cubic_to(c1, c2, to);
                    Ok(())
                })?,
                'Z' => {
                    self.commands.push(PathCommand::ClosePath);
                    self.current = self.subpath_start;
                    self.last_control = None;
                }
                'Q' | 'T' | 'A' => {
                    return Err(IngestionError::UnsupportedCurve { command, position });
                }
                _ => {
                    return Err(IngestionError::Malformed {
                        position,
                        reason: format!("unknown command '{command}'"),
                    });
                }
            }
        }

        Ok(self.commands)
    }

    /// Runs `group` once, then again for every implicit repetition
    fn repeated(
        &mut self,
        mut group: impl FnMut(&mut Self) -> Result<(), IngestionError>,
    ) -> Result<(), IngestionError> {
        group(self)?;
        while self.lexer.at_number() {
            group(self)?;
        }
        Ok(())
    }

    fn point(&mut self, relative: bool) -> Result<VectorPoint, IngestionError> {
        let x = self.lexer.number()?;
        let y = self.lexer.number()?;
        if relative {
            Ok(VectorPoint::new(self.current.x() + x, self.current.y() + y))
        } else {
            Ok(VectorPoint::new(x, y))
        }
    }

    fn reflected_control(&self) -> VectorPoint {
        match self.last_control {
            Some(control) => VectorPoint::new(
                2.0 * self.current.x() - control.x(),
                2.0 * self.current.y() - control.y(),
            ),
            None => self.current,
        }
    }

    fn move_to(&mut self, to: VectorPoint) {
        self.commands.push(PathCommand::MoveTo(to));
        self.current = to;
        self.subpath_start = to;
        self.last_control = None;
    }

    fn line_to(&mut self, to: VectorPoint) {
        self.commands.push(PathCommand::LineTo(to));
        self.current = to;
        self.last_control = None;
    }

    fn cubic_to(&mut self, c1: VectorPoint, c2: VectorPoint, to: VectorPoint) {
        self.commands.push(PathCommand::CubicTo { c1, c2, to });
        self.current = to;
        self.last_control = Some(c2);
    }
}
