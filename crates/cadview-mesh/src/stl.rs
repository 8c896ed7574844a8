//! STL import (binary and ASCII) into an indexed, welded mesh.

use cadview_core::model::Mesh;
use nom::{
    bytes::complete::{tag, take},
    character::complete::{multispace0, multispace1, not_line_ending},
    multi::{count, many0},
    number::complete::{double, le_f32, le_u32},
    sequence::{preceded, tuple},
    IResult,
};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StlError {
    #[error("file too small to be a valid STL ({0} bytes)")]
    TooSmall(usize),

    #[error("binary STL declares {declared} triangles but holds {available}")]
    Truncated { declared: usize, available: usize },

    #[error("failed to parse ASCII STL: {0}")]
    Ascii(String),
}

type Facet = [[f64; 3]; 3];

/// Detects the STL flavour and welds coincident vertices within `weld_tolerance`.
pub fn parse_stl(data: &[u8], weld_tolerance: f64) -> Result<Mesh, StlError> {
    // Binary files may also start with "solid", so fall back on failure.
    if data.starts_with(b"solid") {
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok(facets) = parse_ascii_facets(text) {
                return Ok(weld(&facets, weld_tolerance));
            }
        }
    }
    let facets = parse_binary_facets(data)?;
    Ok(weld(&facets, weld_tolerance))
}

pub fn parse_binary_stl(data: &[u8], weld_tolerance: f64) -> Result<Mesh, StlError> {
    Ok(weld(&parse_binary_facets(data)?, weld_tolerance))
}

pub fn parse_ascii_stl(text: &str, weld_tolerance: f64) -> Result<Mesh, StlError> {
    Ok(weld(&parse_ascii_facets(text)?, weld_tolerance))
}

fn parse_binary_facets(data: &[u8]) -> Result<Vec<Facet>, StlError> {
    // 80-byte header, then the declared triangle count
    let header: IResult<&[u8], u32> = preceded(take(80usize), le_u32)(data);
    let Ok((body, declared)) = header else {
        return Err(StlError::TooSmall(data.len()));
    };
    let declared = declared as usize;
    let available = body.len() / 50;
    if available < declared {
        return Err(StlError::Truncated {
            declared,
            available,
        });
    }

    let parsed: IResult<&[u8], Vec<Facet>> = count(binary_facet, declared)(body);
    parsed
        .map(|(_, facets)| facets)
        .map_err(|_| StlError::Truncated {
            declared,
            available,
        })
}

fn binary_facet(input: &[u8]) -> IResult<&[u8], Facet> {
    // normal, three vertices, attribute byte count
    let (input, _) = take(12usize)(input)?;
    let (input, v) = count(binary_vec3, 3)(input)?;
    let (input, _) = take(2usize)(input)?;
    Ok((input, [v[0], v[1], v[2]]))
}

fn binary_vec3(input: &[u8]) -> IResult<&[u8], [f64; 3]> {
    let (input, (x, y, z)) = tuple((le_f32, le_f32, le_f32))(input)?;
    Ok((input, [x as f64, y as f64, z as f64]))
}

fn parse_ascii_facets(text: &str) -> Result<Vec<Facet>, StlError> {
    match ascii_solid(text) {
        Ok((_, facets)) => Ok(facets),
        Err(e) => Err(StlError::Ascii(format!("{e:?}"))),
    }
}

fn ascii_solid(input: &str) -> IResult<&str, Vec<Facet>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _) = not_line_ending(input)?;
    let (input, facets) = many0(ascii_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    let (input, _) = not_line_ending(input)?;
    Ok((input, facets))
}

fn ascii_facet(input: &str) -> IResult<&str, Facet> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _) = ascii_vec3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, v0) = ascii_vertex(input)?;
    let (input, v1) = ascii_vertex(input)?;
    let (input, v2) = ascii_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;
    Ok((input, [v0, v1, v2]))
}

fn ascii_vertex(input: &str) -> IResult<&str, [f64; 3]> {
    preceded(preceded(multispace0, tag("vertex")), ascii_vec3)(input)
}

fn ascii_vec3(input: &str) -> IResult<&str, [f64; 3]> {
    let (input, x) = preceded(multispace1, double)(input)?;
    let (input, y) = preceded(multispace1, double)(input)?;
    let (input, z) = preceded(multispace1, double)(input)?;
    Ok((input, [x, y, z]))
}

/// Merges vertices that fall in the same `tolerance`-sized grid cell and
/// drops triangles that collapse as a result.
fn weld(facets: &[Facet], tolerance: f64) -> Mesh {
    let scale = 1.0 / tolerance.max(f64::MIN_POSITIVE);
    let mut index: HashMap<(i64, i64, i64), u32> = HashMap::new();
    let mut mesh = Mesh::default();

    for facet in facets {
        let mut tri = [0u32; 3];
        for (slot, v) in tri.iter_mut().zip(facet) {
            let key = (
                (v[0] * scale).round() as i64,
                (v[1] * scale).round() as i64,
                (v[2] * scale).round() as i64,
            );
            *slot = *index.entry(key).or_insert_with(|| {
                mesh.vertices.push(nalgebra::Point3::new(v[0], v[1], v[2]));
                (mesh.vertices.len() - 1) as u32
            });
        }
        let [a, b, c] = tri;
        if a != b && b != c && c != a {
            mesh.triangles.push(tri);
        }
    }
    mesh
}
