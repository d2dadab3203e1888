//! Reading road line art from SVG documents

mod path_data;

pub use path_data::{PathCommand, parse_path_data};

use roxmltree::{Document, ParsingOptions};

use crate::loading::IngestionError;
use crate::model::VectorPoint;

/// Curve geometry attached to the point that ends a curved segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Cubic { c1: VectorPoint, c2: VectorPoint },
}

/// Endpoint of one drawing instruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub point: VectorPoint,
    /// Starts a new subpath, so no segment leads into it
    pub move_to: bool,
    /// Control points when the segment ending here is a curve
    pub curve: Option<Curve>,
}

/// Resolves commands to the ordered list of points they visit.
/// A close-path revisits the start of its subpath.
pub fn to_path_points(commands: &[PathCommand]) -> Vec<PathPoint> {
    let mut points = Vec::with_capacity(commands.len());
    let mut subpath_start = None;

    for command in commands {
        let path_point = match *command {
            PathCommand::MoveTo(point) => {
                subpath_start = Some(point);
                PathPoint {
                    point,
                    move_to: true,
                    curve: None,
                }
            }
            PathCommand::LineTo(point) => PathPoint {
                point,
                move_to: false,
                curve: None,
            },
            PathCommand::CubicTo { c1, c2, to } => PathPoint {
                point: to,
                move_to: false,
                curve: Some(Curve::Cubic { c1, c2 }),
            },
            PathCommand::ClosePath => match subpath_start {
                Some(point) => PathPoint {
                    point,
                    move_to: false,
                    curve: None,
                },
                None => continue,
            },
        };
        points.push(path_point);
    }

    points
}

/// Returns the `d` attribute of every `<path>` element in `document`, in
/// document order. Comments, CDATA and attribute values never count as
/// elements.
///
/// # Errors
///
/// [`IngestionError::InvalidSvg`] when `document` is not well-formed XML,
/// [`IngestionError::NoPathElement`] when it has no path data.
pub fn extract_path_data(document: &str) -> Result<Vec<String>, IngestionError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let tree = Document::parse_with_options(document, options).map_err(|e| {
        let pos = e.pos();
        IngestionError::InvalidSvg {
            row: pos.row,
            col: pos.col,
            reason: e.to_string(),
        }
    })?;

    let found: Vec<String> = tree
        .descendants()
        .filter(|node| node.is_element() && node.has_tag_name("path"))
        .filter_map(|node| node.attribute("d"))
        .map(str::to_owned)
        .collect();

    if found.is_empty() {
        Err(IngestionError::NoPathElement)
    } else {
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROADS_SVG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 2048 1776">
  <g id="roads" fill="none" stroke="black">
    <path id="north" stroke-width="2" d="M 10 10 L 20 10"/>
    <pathology d="M 0 0 L 1 1"/>
    <path
        d='M30 30 C 35 30 40 35 40 40'
        />
  </g>
</svg>"#;

    #[test]
    fn extracts_every_path_in_order() {
        let data = extract_path_data(ROADS_SVG).unwrap();
        assert_eq!(data, vec!["M 10 10 L 20 10", "M30 30 C 35 30 40 35 40 40"]);
    }

    #[test]
    fn document_without_paths_is_rejected() {
        let svg = r#"<svg><rect width="10" height="10"/></svg>"#;
        assert_eq!(extract_path_data(svg), Err(IngestionError::NoPathElement));
    }

    #[test]
    fn commented_out_paths_are_ignored() {
        let svg = r#"<svg><!-- <path d="M500 500L600 600"/> --><path d="M0 0L1 1"/></svg>"#;
        assert_eq!(extract_path_data(svg).unwrap(), vec!["M0 0L1 1"]);
    }

    #[test]
    fn angle_bracket_in_attribute_keeps_the_path() {
        let svg = r#"<svg xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape">
  <path inkscape:label="A->B" d="M0 0L1 1"/>
  <path d="M5 5L6 6" data-note="a > b"/>
</svg>"#;
        assert_eq!(extract_path_data(svg).unwrap(), vec!["M0 0L1 1", "M5 5L6 6"]);
    }

    #[test]
    fn unterminated_tag_is_invalid() {
        assert!(matches!(
            extract_path_data(r#"<svg><path d="M0 0 L1 1""#),
            Err(IngestionError::InvalidSvg { row: 1, .. })
        ));
    }

    #[test]
    fn doctype_is_accepted() {
        let svg = r#"<?xml version="1.0"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg"><path d="M0 0H10"/></svg>"#;
        assert_eq!(extract_path_data(svg).unwrap(), vec!["M0 0H10"]);
    }

    #[test]
    fn points_mark_subpath_starts_and_curves() {
        let commands = parse_path_data("M0 0L10 0C10 5 15 10 20 10M50 50L60 50Z").unwrap();
        let points = to_path_points(&commands);

        let moves: Vec<bool> = points.iter().map(|p| p.move_to).collect();
        assert_eq!(moves, vec![true, false, false, true, false, false]);
        assert!(matches!(points[2].curve, Some(Curve::Cubic { .. })));
        assert_eq!(points[5].point, VectorPoint::new(50.0, 50.0));
    }
}
