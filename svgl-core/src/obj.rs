//! Wavefront OBJ import into flat vertex and face arrays.
use log::{debug, warn};
use nom::{
    character::complete::{char, i64 as parse_i64, space1},
    combinator::{all_consuming, opt},
    multi::many1,
    number::complete::float,
    sequence::{preceded, terminated, tuple},
    IResult,
};

use crate::error::{Result, SvglError};
use crate::mesh::MeshData;

/// One statement of an OBJ file that matters for geometry.
#[derive(Debug, Clone, PartialEq)]
enum Statement {
    Position([f32; 3]),
    Normal([f32; 3]),
    /// Raw position indices, 1-based or negative (relative).
    Face(Vec<i64>),
}

/// Parse OBJ text into [`MeshData`].
///
/// Positions (`v`), normals (`vn`) and faces (`f`) are read; everything else
/// (texture coordinates, groups, materials) is ignored. When every face has
/// the same vertex count that count becomes `vertices_per_face`; mixed
/// triangle/quad input is fan-triangulated.
pub fn parse_obj(input: &str) -> Result<MeshData> {
    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut polygons: Vec<Vec<u32>> = Vec::new();

    for (number, raw) in input.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let statement = match statement(line) {
            Ok((_, Some(statement))) => statement,
            Ok((_, None)) => continue,
            Err(e) => {
                return Err(SvglError::ObjParse(format!("line {}: {e}", number + 1)));
            }
        };

        match statement {
            Statement::Position(p) => vertices.extend_from_slice(&p),
            Statement::Normal(n) => normals.extend_from_slice(&n),
            Statement::Face(indices) => {
                if indices.len() < 3 {
                    return Err(SvglError::ObjParse(format!(
                        "line {}: a face needs at least 3 vertices",
                        number + 1
                    )));
                }
                let nb_vertices = vertices.len() / 3;
                let face = indices
                    .iter()
                    .map(|&i| resolve_index(i, nb_vertices))
                    .collect::<Option<Vec<u32>>>()
                    .ok_or_else(|| {
                        SvglError::ObjParse(format!("line {}: face index out of range", number + 1))
                    })?;
                polygons.push(face);
            }
        }
    }

    let arity = polygons.first().map_or(3, Vec::len);
    let (faces, vertices_per_face) = if polygons.iter().all(|p| p.len() == arity) {
        (polygons.concat(), arity)
    } else {
        warn!("mixed face sizes, triangulating {} polygons", polygons.len());
        (triangulate(&polygons), 3)
    };

    debug!(
        "parsed OBJ: {} vertices, {} faces of {} vertices",
        vertices.len() / 3,
        faces.len() / vertices_per_face,
        vertices_per_face
    );

    Ok(MeshData {
        vertices,
        faces,
        vertices_per_face,
        normals: (!normals.is_empty()).then_some(normals),
    })
}

/// 1-based indices count from the start, negative ones back from the last
/// vertex read so far. Zero is never valid.
fn resolve_index(index: i64, nb_vertices: usize) -> Option<u32> {
    let resolved = match index {
        i if i > 0 => i - 1,
        i if i < 0 => nb_vertices as i64 + i,
        _ => return None,
    };
    (0..nb_vertices as i64)
        .contains(&resolved)
        .then_some(resolved as u32)
}

/// Fan triangulation around each polygon's first vertex.
fn triangulate(polygons: &[Vec<u32>]) -> Vec<u32> {
    polygons
        .iter()
        .flat_map(|p| (1..p.len() - 1).flat_map(move |i| [p[0], p[i], p[i + 1]]))
        .collect()
}

/// `None` for statements that carry no geometry.
fn statement(input: &str) -> IResult<&str, Option<Statement>> {
    if let Some(rest) = keyword(input, "vn") {
        let (rest, n) = all_consuming(vector3)(rest)?;
        return Ok((rest, Some(Statement::Normal(n))));
    }
    if let Some(rest) = keyword(input, "v") {
        // An optional fourth (w) coordinate is accepted and dropped.
        let (rest, p) = all_consuming(terminated(vector3, opt(preceded(space1, float))))(rest)?;
        return Ok((rest, Some(Statement::Position(p))));
    }
    if let Some(rest) = keyword(input, "f") {
        let (rest, indices) = all_consuming(many1(preceded(space1, face_vertex)))(rest)?;
        return Ok((rest, Some(Statement::Face(indices))));
    }
    Ok(("", None))
}

/// The rest of the line if it starts with `word` followed by whitespace.
fn keyword<'a>(input: &'a str, word: &str) -> Option<&'a str> {
    let rest = input.strip_prefix(word)?;
    rest.starts_with(|c: char| c.is_whitespace()).then_some(rest)
}

fn vector3(input: &str) -> IResult<&str, [f32; 3]> {
    let (input, (_, x, _, y, _, z)) =
        tuple((space1, float, space1, float, space1, float))(input)?;
    Ok((input, [x, y, z]))
}

/// `v`, `v/vt`, `v//vn` or `v/vt/vn`; only the position index is kept.
fn face_vertex(input: &str) -> IResult<&str, i64> {
    let (input, index) = parse_i64(input)?;
    let (input, _) = opt(tuple((
        char('/'),
        opt(parse_i64),
        opt(preceded(char('/'), parse_i64)),
    )))(input)?;
    Ok((input, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TETRA: &str = "\
# a tetrahedron
o tetra
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1.5
vn 0 0 -1
vt 0.5 0.5
f 1 3 2
f 1/1 2/1 4/1
f 1//1 4//1 3//1
f 2/1/1 3/1/1 4/1/1
";

    #[test]
    fn test_parse_triangles() {
        let data = parse_obj(TETRA).unwrap();
        assert_eq!(data.vertices.len(), 12);
        assert_eq!(data.vertices[11], 1.5);
        assert_eq!(data.vertices_per_face, 3);
        assert_eq!(data.faces, vec![0, 2, 1, 0, 1, 3, 0, 3, 2, 1, 2, 3]);
        assert_eq!(data.normals, Some(vec![0.0, 0.0, -1.0]));
    }

    #[test]
    fn test_quads_keep_their_arity() {
        let data = parse_obj("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();
        assert_eq!(data.vertices_per_face, 4);
        assert_eq!(data.faces, vec![0, 1, 2, 3]);
        assert!(data.normals.is_none());
    }

    #[test]
    fn test_mixed_faces_are_triangulated() {
        let obj = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 2 0 0\nf 1 2 3 4\nf 2 5 3\n";
        let data = parse_obj(obj).unwrap();
        assert_eq!(data.vertices_per_face, 3);
        assert_eq!(data.faces, vec![0, 1, 2, 0, 2, 3, 1, 4, 2]);
    }

    #[test]
    fn test_negative_indices_are_relative() {
        let data = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n").unwrap();
        assert_eq!(data.faces, vec![0, 1, 2]);
    }

    #[test]
    fn test_out_of_range_and_malformed() {
        assert!(matches!(
            parse_obj("v 0 0 0\nf 1 2 3\n"),
            Err(SvglError::ObjParse(_))
        ));
        assert!(parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").is_err());
        let err = parse_obj("v 0 zero 0\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
        assert!(parse_obj("v 0 0 0\nv 1 0 0\nf 1 2\n").is_err());
    }

    #[test]
    fn test_homogeneous_w_and_comments() {
        let data = parse_obj("v 1 2 3 1.0 # with w\n\n  # only a comment\nvn 0 1 0\n").unwrap();
        assert_eq!(data.vertices, vec![1.0, 2.0, 3.0]);
        assert!(data.faces.is_empty());
    }
}
