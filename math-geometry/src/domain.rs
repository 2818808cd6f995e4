//! Collections of geometries integrated element by element

use crate::error::{GeometryError, Result};
use crate::geometry::Geometry;
use crate::parametrized::Parametrized;
use crate::solids::Tetrahedron;
use crate::surfaces::{Quadrangle, Triangle};
use crate::types::Point3D;
use serde::{Deserialize, Serialize};

/// Element connectivity, as indices into the mesh vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connectivity {
    Triangle([usize; 3]),
    Quadrangle([usize; 4]),
    Tetrahedron([usize; 4]),
}

impl Connectivity {
    pub fn paramdim(&self) -> usize {
        match self {
            Connectivity::Triangle(_) | Connectivity::Quadrangle(_) => 2,
            Connectivity::Tetrahedron(_) => 3,
        }
    }

    pub fn indices(&self) -> &[usize] {
        match self {
            Connectivity::Triangle(i) => i,
            Connectivity::Quadrangle(i) | Connectivity::Tetrahedron(i) => i,
        }
    }
}

/// Unstructured mesh of a single parametric dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SimpleMeshData")]
pub struct SimpleMesh {
    vertices: Vec<Point3D>,
    connectivity: Vec<Connectivity>,
}

#[derive(Deserialize)]
struct SimpleMeshData {
    vertices: Vec<Point3D>,
    connectivity: Vec<Connectivity>,
}

impl TryFrom<SimpleMeshData> for SimpleMesh {
    type Error = GeometryError;

    fn try_from(data: SimpleMeshData) -> Result<Self> {
        Self::new(data.vertices, data.connectivity)
    }
}

impl SimpleMesh {
    pub fn new(vertices: Vec<Point3D>, connectivity: Vec<Connectivity>) -> Result<Self> {
        let first = connectivity
            .first()
            .ok_or_else(|| GeometryError::degenerate("SimpleMesh", "mesh has no elements"))?;
        let expected = first.paramdim();

        for (index, element) in connectivity.iter().enumerate() {
            if element.paramdim() != expected {
                return Err(GeometryError::HeterogeneousDomain {
                    expected,
                    found: element.paramdim(),
                    index,
                });
            }
            if let Some(&bad) = element.indices().iter().find(|&&i| i >= vertices.len()) {
                return Err(GeometryError::degenerate(
                    "SimpleMesh",
                    format!(
                        "element {} references vertex {} but the mesh has {} vertices",
                        index,
                        bad,
                        vertices.len()
                    ),
                ));
            }
        }

        Ok(Self {
            vertices,
            connectivity,
        })
    }

    pub fn vertices(&self) -> &[Point3D] {
        &self.vertices
    }

    pub fn connectivity(&self) -> &[Connectivity] {
        &self.connectivity
    }

    pub fn num_elements(&self) -> usize {
        self.connectivity.len()
    }

    /// Materialize every element as a geometry, in connectivity order
    pub fn elements(&self) -> Vec<Geometry> {
        let v = |i: usize| self.vertices[i];
        self.connectivity
            .iter()
            .map(|element| match *element {
                Connectivity::Triangle([a, b, c]) => {
                    Geometry::Triangle(Triangle::new(v(a), v(b), v(c)))
                }
                Connectivity::Quadrangle([a, b, c, d]) => {
                    Geometry::Quadrangle(Quadrangle::new(v(a), v(b), v(c), v(d)))
                }
                Connectivity::Tetrahedron([a, b, c, d]) => {
                    Geometry::Tetrahedron(Tetrahedron::new(v(a), v(b), v(c), v(d)))
                }
            })
            .collect()
    }
}

impl Parametrized for SimpleMesh {
    fn name(&self) -> &'static str {
        "SimpleMesh"
    }

    fn paramdim(&self) -> usize {
        self.connectivity.first().map_or(0, Connectivity::paramdim)
    }

    fn point(&self, _params: &[f64]) -> Result<Point3D> {
        Err(GeometryError::NoParametrization {
            geometry: self.name(),
        })
    }

    fn measure(&self) -> Option<f64> {
        self.elements().iter().map(Parametrized::measure).sum()
    }

    fn interior_point(&self) -> Result<Point3D> {
        match self.elements().first() {
            Some(element) => element.interior_point(),
            None => Err(GeometryError::degenerate("SimpleMesh", "mesh has no elements")),
        }
    }
}

/// Heterogeneous collection of geometries sharing one parametric dimension
#[derive(Debug, Clone)]
pub struct GeometrySet {
    items: Vec<Geometry>,
}

impl GeometrySet {
    pub fn new(items: Vec<Geometry>) -> Result<Self> {
        let first = items
            .first()
            .ok_or_else(|| GeometryError::degenerate("GeometrySet", "set is empty"))?;
        let expected = first.paramdim();
        if let Some((index, item)) = items
            .iter()
            .enumerate()
            .find(|(_, g)| g.paramdim() != expected)
        {
            return Err(GeometryError::HeterogeneousDomain {
                expected,
                found: item.paramdim(),
                index,
            });
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[Geometry] {
        &self.items
    }

    pub fn elements(&self) -> Vec<Geometry> {
        self.items.clone()
    }
}

impl Parametrized for GeometrySet {
    fn name(&self) -> &'static str {
        "GeometrySet"
    }

    fn paramdim(&self) -> usize {
        self.items.first().map_or(0, Parametrized::paramdim)
    }

    fn point(&self, _params: &[f64]) -> Result<Point3D> {
        Err(GeometryError::NoParametrization {
            geometry: self.name(),
        })
    }

    fn measure(&self) -> Option<f64> {
        self.items.iter().map(Parametrized::measure).sum()
    }

    fn interior_point(&self) -> Result<Point3D> {
        match self.items.first() {
            Some(item) => item.interior_point(),
            None => Err(GeometryError::degenerate("GeometrySet", "set is empty")),
        }
    }
}
