//! ASCII STL file loading.
//!
//! This module parses the ASCII STL grammar into a sequence of [`Facet`]
//! records. Every facet must carry exactly one normal and exactly three
//! vertices; anything else is a format error. Binary STL is not supported.

use super::Facet;
use crate::geometry::Point3F;
use crate::{CoordF, Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load the facets of an ASCII STL file.
///
/// The file is fully read and closed before the caller continues with
/// deduplication; nothing is written anywhere on failure.
pub fn load_stl<P: AsRef<Path>>(path: P) -> Result<Vec<Facet>> {
    let file = File::open(path)?;
    parse_stl(BufReader::new(file))
}

/// Where the parser is inside the STL grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    /// Before a `solid` line.
    ExpectSolid,
    /// Between facet records.
    InSolid,
    /// After `facet normal`, before `outer loop`.
    ExpectLoop,
    /// Inside `outer loop`, collecting vertices.
    InLoop,
    /// After `endloop`, before `endfacet`.
    ExpectEndFacet,
}

/// Parse ASCII STL from a buffered reader.
///
/// A solid with zero facets is valid and yields an empty vector. Multiple
/// `solid` blocks are accepted; their facets concatenate in file order.
pub fn parse_stl<R: BufRead>(reader: R) -> Result<Vec<Facet>> {
    let mut facets = Vec::new();
    let mut state = ParserState::ExpectSolid;
    let mut solids = 0usize;
    let mut normal = Point3F::zero();
    let mut corners: Vec<Point3F> = Vec::with_capacity(3);

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let line_no = idx + 1;

        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };

        match state {
            ParserState::ExpectSolid => {
                if keyword != "solid" {
                    return Err(format_error(
                        line_no,
                        &format!("expected `solid`, found `{keyword}`"),
                    ));
                }
                solids += 1;
                state = ParserState::InSolid;
            }
            ParserState::InSolid => match keyword {
                "facet" => {
                    if tokens.next() != Some("normal") {
                        return Err(format_error(line_no, "expected `facet normal`"));
                    }
                    normal = parse_point(&mut tokens, line_no)?;
                    corners.clear();
                    state = ParserState::ExpectLoop;
                }
                "endsolid" => {
                    state = ParserState::ExpectSolid;
                }
                _ => {
                    return Err(format_error(
                        line_no,
                        &format!("expected `facet` or `endsolid`, found `{keyword}`"),
                    ));
                }
            },
            ParserState::ExpectLoop => {
                if keyword != "outer" || tokens.next() != Some("loop") {
                    return Err(format_error(line_no, "expected `outer loop`"));
                }
                state = ParserState::InLoop;
            }
            ParserState::InLoop => match keyword {
                "vertex" => {
                    if corners.len() == 3 {
                        return Err(format_error(
                            line_no,
                            "facet has more than 3 vertices",
                        ));
                    }
                    corners.push(parse_point(&mut tokens, line_no)?);
                }
                "endloop" => {
                    if corners.len() != 3 {
                        return Err(format_error(
                            line_no,
                            &format!("facet has {} vertices, expected 3", corners.len()),
                        ));
                    }
                    state = ParserState::ExpectEndFacet;
                }
                _ => {
                    return Err(format_error(
                        line_no,
                        &format!("expected `vertex` or `endloop`, found `{keyword}`"),
                    ));
                }
            },
            ParserState::ExpectEndFacet => {
                if keyword != "endfacet" {
                    return Err(format_error(
                        line_no,
                        &format!("expected `endfacet`, found `{keyword}`"),
                    ));
                }
                facets.push(Facet {
                    normal,
                    vertices: [corners[0], corners[1], corners[2]],
                });
                state = ParserState::InSolid;
            }
        }
    }

    match state {
        ParserState::ExpectSolid if solids > 0 => Ok(facets),
        ParserState::ExpectSolid => Err(Error::Format(
            "empty input, expected `solid`".into(),
        )),
        ParserState::InSolid => Err(Error::Format(
            "missing `endsolid` at end of file".into(),
        )),
        _ => Err(Error::Format(
            "truncated facet record at end of file".into(),
        )),
    }
}

/// Parse three coordinates off a line's remaining tokens.
fn parse_point<'a, I>(tokens: &mut I, line_no: usize) -> Result<Point3F>
where
    I: Iterator<Item = &'a str>,
{
    let x = parse_coord(tokens.next(), line_no, "X")?;
    let y = parse_coord(tokens.next(), line_no, "Y")?;
    let z = parse_coord(tokens.next(), line_no, "Z")?;
    if tokens.next().is_some() {
        return Err(format_error(line_no, "trailing data after coordinates"));
    }
    Ok(Point3F::new(x, y, z))
}

fn parse_coord(token: Option<&str>, line_no: usize, axis: &str) -> Result<CoordF> {
    let token =
        token.ok_or_else(|| format_error(line_no, &format!("missing {axis} coordinate")))?;
    let value: CoordF = token
        .parse()
        .map_err(|_| format_error(line_no, &format!("invalid {axis} coordinate `{token}`")))?;
    if !value.is_finite() {
        return Err(format_error(
            line_no,
            &format!("non-finite {axis} coordinate `{token}`"),
        ));
    }
    Ok(value)
}

fn format_error(line_no: usize, message: &str) -> Error {
    Error::Format(format!("line {line_no}: {message}"))
}
