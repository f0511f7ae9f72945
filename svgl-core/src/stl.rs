//! STL import for binary and ASCII files, producing indexed triangle data
use std::collections::HashMap;

use log::debug;
use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{multispace0, multispace1},
    combinator::opt,
    multi::many0,
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::error::{Result, SvglError};
use crate::mesh::MeshData;

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

/// Welds identical corner positions into one shared vertex.
#[derive(Default)]
struct Welder {
    vertices: Vec<f32>,
    faces: Vec<u32>,
    lookup: HashMap<[u32; 3], u32>,
}

impl Welder {
    fn push(&mut self, p: [f32; 3]) {
        // -0.0 and 0.0 weld together
        let key = p.map(|c| if c == 0.0 { 0 } else { c.to_bits() });
        let next = (self.vertices.len() / 3) as u32;
        let index = *self.lookup.entry(key).or_insert_with(|| {
            self.vertices.extend_from_slice(&p);
            next
        });
        self.faces.push(index);
    }

    fn finish(self) -> MeshData {
        debug!(
            "STL welded to {} vertices, {} triangles",
            self.vertices.len() / 3,
            self.faces.len() / 3
        );
        MeshData {
            vertices: self.vertices,
            faces: self.faces,
            vertices_per_face: 3,
            normals: None,
        }
    }
}

fn read_f32(data: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

/// Parse a binary STL file
pub fn parse_binary_stl(data: &[u8]) -> Result<MeshData> {
    if data.len() < HEADER_LEN + 4 {
        return Err(SvglError::StlParse("file too small to be a valid STL".to_string()));
    }

    let data = &data[HEADER_LEN..];
    let triangle_count = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
    if 4 + triangle_count * FACET_LEN > data.len() {
        return Err(SvglError::StlParse(format!(
            "header announces {triangle_count} triangles but the file is truncated"
        )));
    }

    let mut welder = Welder::default();
    for facet in data[4..4 + triangle_count * FACET_LEN].chunks_exact(FACET_LEN) {
        // Stored normal (first 12 bytes) and attribute count (last 2) are skipped
        for corner in 0..3 {
            let offset = 12 + corner * 12;
            welder.push([
                read_f32(facet, offset),
                read_f32(facet, offset + 4),
                read_f32(facet, offset + 8),
            ]);
        }
    }

    Ok(welder.finish())
}

/// Parse an ASCII STL file
pub fn parse_ascii_stl(input: &str) -> Result<MeshData> {
    match parse_ascii_stl_impl(input) {
        Ok((_, triangles)) => {
            let mut welder = Welder::default();
            for corner in triangles.into_iter().flatten() {
                welder.push(corner);
            }
            Ok(welder.finish())
        }
        Err(e) => Err(SvglError::StlParse(format!("invalid ASCII STL: {e}"))),
    }
}

fn parse_ascii_stl_impl(input: &str) -> IResult<&str, Vec<[[f32; 3]; 3]>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    // Optional name up to the end of the line
    let (input, _) = take_till(|c| c == '\n')(input)?;
    let (input, triangles) = many0(parse_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    let (input, _) = opt(take_till(|c| c == '\n'))(input)?;
    Ok((input, triangles))
}

fn parse_facet(input: &str) -> IResult<&str, [[f32; 3]; 3]> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _) = parse_vector3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, v1) = parse_vertex(input)?;
    let (input, v2) = parse_vertex(input)?;
    let (input, v3) = parse_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;
    Ok((input, [v1, v2, v3]))
}

fn parse_vertex(input: &str) -> IResult<&str, [f32; 3]> {
    let (input, _) = preceded(multispace0, tag("vertex"))(input)?;
    parse_vector3(input)
}

fn parse_vector3(input: &str) -> IResult<&str, [f32; 3]> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, [x, y, z]))
}

/// Detect and parse STL file (binary or ASCII)
pub fn parse_stl(data: &[u8]) -> Result<MeshData> {
    // Binary files may also start with "solid", so fall back on failure
    if data.starts_with(b"solid") {
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok(mesh) = parse_ascii_stl(text) {
                return Ok(mesh);
            }
        }
    }
    parse_binary_stl(data)
}
