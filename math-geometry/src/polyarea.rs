//! Planar polygons with holes
//!
//! A [`PolyArea`] has no parametrization. It is integrated through its
//! triangulation, computed by ear clipping (earcutr) on the projection onto
//! the coordinate plane most aligned with the polygon.

use crate::error::{GeometryError, Result};
use crate::parametrized::Parametrized;
use crate::surfaces::Triangle;
use crate::types::Point3D;
use serde::{Deserialize, Serialize};

/// Planar polygon: an outer boundary and zero or more holes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolyAreaData")]
pub struct PolyArea {
    outer: Vec<Point3D>,
    holes: Vec<Vec<Point3D>>,
}

#[derive(Deserialize)]
struct PolyAreaData {
    outer: Vec<Point3D>,
    #[serde(default)]
    holes: Vec<Vec<Point3D>>,
}

impl TryFrom<PolyAreaData> for PolyArea {
    type Error = GeometryError;

    fn try_from(data: PolyAreaData) -> Result<Self> {
        Self::with_holes(data.outer, data.holes)
    }
}

impl PolyArea {
    /// Polygon without holes
    pub fn new(outer: Vec<Point3D>) -> Result<Self> {
        Self::with_holes(outer, Vec::new())
    }

    /// Polygon with holes. A repeated closing vertex is dropped.
    pub fn with_holes(outer: Vec<Point3D>, holes: Vec<Vec<Point3D>>) -> Result<Self> {
        let outer = open_ring(outer)?;
        let holes = holes.into_iter().map(open_ring).collect::<Result<Vec<_>>>()?;
        if newell_normal(&outer).normalize().is_none() {
            return Err(GeometryError::degenerate("PolyArea", "outer boundary has zero area"));
        }
        Ok(Self { outer, holes })
    }

    pub fn outer(&self) -> &[Point3D] {
        &self.outer
    }

    pub fn holes(&self) -> &[Vec<Point3D>] {
        &self.holes
    }

    /// Area enclosed by the outer boundary minus the hole areas
    pub fn area(&self) -> f64 {
        let outer = 0.5 * newell_normal(&self.outer).length();
        let holes: f64 = self
            .holes
            .iter()
            .map(|h| 0.5 * newell_normal(h).length())
            .sum();
        outer - holes
    }

    /// Triangulate by ear clipping
    pub fn triangulate(&self) -> Result<Vec<Triangle>> {
        let normal = newell_normal(&self.outer);
        let (i, j) = projection_axes(&normal);

        let vertices: Vec<Point3D> = self
            .outer
            .iter()
            .chain(self.holes.iter().flatten())
            .copied()
            .collect();
        let mut hole_indices = Vec::with_capacity(self.holes.len());
        let mut offset = self.outer.len();
        for hole in &self.holes {
            hole_indices.push(offset);
            offset += hole.len();
        }

        let flat: Vec<f64> = vertices
            .iter()
            .flat_map(|p| {
                let c = p.to_array();
                [c[i], c[j]]
            })
            .collect();

        let indices = earcutr::earcut(&flat, &hole_indices, 2).map_err(|e| {
            GeometryError::Triangulation {
                geometry: "PolyArea",
                reason: format!("{:?}", e),
            }
        })?;
        if indices.is_empty() {
            return Err(GeometryError::Triangulation {
                geometry: "PolyArea",
                reason: "ear clipping produced no triangles".to_string(),
            });
        }

        log::debug!(
            "triangulated PolyArea with {} vertices and {} holes into {} triangles",
            vertices.len(),
            self.holes.len(),
            indices.len() / 3
        );

        Ok(indices
            .chunks_exact(3)
            .map(|t| Triangle::new(vertices[t[0]], vertices[t[1]], vertices[t[2]]))
            .collect())
    }
}

impl Parametrized for PolyArea {
    fn name(&self) -> &'static str {
        "PolyArea"
    }

    fn paramdim(&self) -> usize {
        2
    }

    fn point(&self, _params: &[f64]) -> Result<Point3D> {
        Err(GeometryError::NoParametrization {
            geometry: self.name(),
        })
    }

    fn measure(&self) -> Option<f64> {
        Some(self.area())
    }

    fn interior_point(&self) -> Result<Point3D> {
        let triangles = self.triangulate()?;
        triangles
            .first()
            .map(Triangle::centroid)
            .ok_or(GeometryError::Triangulation {
                geometry: "PolyArea",
                reason: "no triangles".to_string(),
            })
    }
}

fn open_ring(mut ring: Vec<Point3D>) -> Result<Vec<Point3D>> {
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    if ring.len() < 3 {
        return Err(GeometryError::degenerate(
            "PolyArea",
            format!("boundary needs at least 3 vertices, got {}", ring.len()),
        ));
    }
    Ok(ring)
}

/// Newell's method: twice the vector area of a closed polygon
fn newell_normal(ring: &[Point3D]) -> Point3D {
    let mut n = Point3D::zero();
    for (k, p) in ring.iter().enumerate() {
        let q = ring[(k + 1) % ring.len()];
        n.x += (p.y - q.y) * (p.z + q.z);
        n.y += (p.z - q.z) * (p.x + q.x);
        n.z += (p.x - q.x) * (p.y + q.y);
    }
    n
}

/// Coordinate axes kept when projecting along the dominant normal component
fn projection_axes(normal: &Point3D) -> (usize, usize) {
    let (ax, ay, az) = (normal.x.abs(), normal.y.abs(), normal.z.abs());
    if az >= ax && az >= ay {
        (0, 1)
    } else if ay >= ax {
        (2, 0)
    } else {
        (1, 2)
    }
}
