//! Values an integrand may return
//!
//! The engine integrates flat `f64` components. [`IntegrandValue`] flattens a
//! value into components and rebuilds a value of the same shape from summed
//! components and a template captured once per integral.

use math_geometry::{Point3D, Quantity, Unit};
use ndarray::Array1;
use num_complex::Complex64;

/// A value with a fixed number of real components
pub trait IntegrandValue: Sized {
    /// Number of `f64` components
    fn num_components(&self) -> usize;

    /// Write the components into `out`, whose length is `num_components()`
    fn write_components(&self, out: &mut [f64]);

    /// Rebuild a value shaped like `template` from its components
    fn from_components(template: &Self, components: &[f64]) -> Self;

    /// Attach the measure unit `m^N` of the integration domain.
    /// Values without units ignore it.
    fn with_measure_unit(self, _unit: Unit) -> Self {
        self
    }
}

impl IntegrandValue for f64 {
    fn num_components(&self) -> usize {
        1
    }

    fn write_components(&self, out: &mut [f64]) {
        out[0] = *self;
    }

    fn from_components(_template: &Self, components: &[f64]) -> Self {
        components[0]
    }
}

impl<const N: usize> IntegrandValue for [f64; N] {
    fn num_components(&self) -> usize {
        N
    }

    fn write_components(&self, out: &mut [f64]) {
        out.copy_from_slice(self);
    }

    fn from_components(_template: &Self, components: &[f64]) -> Self {
        let mut value = [0.0; N];
        value.copy_from_slice(components);
        value
    }
}

impl IntegrandValue for Point3D {
    fn num_components(&self) -> usize {
        3
    }

    fn write_components(&self, out: &mut [f64]) {
        out.copy_from_slice(&self.to_array());
    }

    fn from_components(_template: &Self, components: &[f64]) -> Self {
        Point3D::new(components[0], components[1], components[2])
    }
}

impl IntegrandValue for Complex64 {
    fn num_components(&self) -> usize {
        2
    }

    fn write_components(&self, out: &mut [f64]) {
        out[0] = self.re;
        out[1] = self.im;
    }

    fn from_components(_template: &Self, components: &[f64]) -> Self {
        Complex64::new(components[0], components[1])
    }
}

impl IntegrandValue for Array1<f64> {
    fn num_components(&self) -> usize {
        self.len()
    }

    fn write_components(&self, out: &mut [f64]) {
        for (o, v) in out.iter_mut().zip(self.iter()) {
            *o = *v;
        }
    }

    fn from_components(_template: &Self, components: &[f64]) -> Self {
        Array1::from(components.to_vec())
    }
}

impl<V: IntegrandValue> IntegrandValue for Quantity<V> {
    fn num_components(&self) -> usize {
        self.value.num_components()
    }

    fn write_components(&self, out: &mut [f64]) {
        self.value.write_components(out);
    }

    fn from_components(template: &Self, components: &[f64]) -> Self {
        Quantity::new(V::from_components(&template.value, components), template.unit)
    }

    fn with_measure_unit(self, unit: Unit) -> Self {
        Quantity::new(self.value.with_measure_unit(unit), self.unit * unit)
    }
}
