//! SI dimensions and unit-carrying values
//!
//! A [`Unit`] records the exponents of the seven SI base dimensions. Only
//! coherent SI units are represented, so multiplying quantities never needs a
//! conversion factor. Geometry coordinates are always in metres.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Div, Mul};

const BASE_SYMBOLS: [&str; 7] = ["m", "kg", "s", "A", "K", "mol", "cd"];

/// Product of SI base units raised to integer powers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Unit {
    exponents: [i8; 7],
}

impl Unit {
    /// Dimensionless
    pub const ONE: Unit = Unit::from_exponents([0, 0, 0, 0, 0, 0, 0]);
    pub const METER: Unit = Unit::from_exponents([1, 0, 0, 0, 0, 0, 0]);
    pub const KILOGRAM: Unit = Unit::from_exponents([0, 1, 0, 0, 0, 0, 0]);
    pub const SECOND: Unit = Unit::from_exponents([0, 0, 1, 0, 0, 0, 0]);
    pub const AMPERE: Unit = Unit::from_exponents([0, 0, 0, 1, 0, 0, 0]);
    pub const KELVIN: Unit = Unit::from_exponents([0, 0, 0, 0, 1, 0, 0]);
    pub const MOLE: Unit = Unit::from_exponents([0, 0, 0, 0, 0, 1, 0]);
    pub const CANDELA: Unit = Unit::from_exponents([0, 0, 0, 0, 0, 0, 1]);

    /// Build a unit from base exponents in the order m, kg, s, A, K, mol, cd
    pub const fn from_exponents(exponents: [i8; 7]) -> Self {
        Self { exponents }
    }

    pub fn exponents(&self) -> [i8; 7] {
        self.exponents
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Raise to an integer power
    pub fn powi(self, n: i32) -> Unit {
        let mut exponents = self.exponents;
        for e in exponents.iter_mut() {
            *e = (*e as i32 * n).clamp(i8::MIN as i32, i8::MAX as i32) as i8;
        }
        Unit { exponents }
    }

    fn combine(self, other: Unit, sign: i8) -> Unit {
        let mut exponents = self.exponents;
        for (e, o) in exponents.iter_mut().zip(other.exponents) {
            *e = e.saturating_add(sign.saturating_mul(o));
        }
        Unit { exponents }
    }
}

impl Mul for Unit {
    type Output = Unit;
    fn mul(self, rhs: Unit) -> Unit {
        self.combine(rhs, 1)
    }
}

impl Div for Unit {
    type Output = Unit;
    fn div(self, rhs: Unit) -> Unit {
        self.combine(rhs, -1)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "1");
        }
        // Kilogram first, the way units are usually written (kg·m^2·s^-2)
        let order = [1, 0, 2, 3, 4, 5, 6];
        let mut first = true;
        for &i in &order {
            let e = self.exponents[i];
            if e == 0 {
                continue;
            }
            if !first {
                write!(f, "·")?;
            }
            first = false;
            if e == 1 {
                write!(f, "{}", BASE_SYMBOLS[i])?;
            } else {
                write!(f, "{}^{}", BASE_SYMBOLS[i], e)?;
            }
        }
        Ok(())
    }
}

/// A value paired with its SI unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity<V> {
    pub value: V,
    pub unit: Unit,
}

impl<V> Quantity<V> {
    pub fn new(value: V, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn dimensionless(value: V) -> Self {
        Self::new(value, Unit::ONE)
    }

    /// Apply `f` to the value, keeping the unit
    pub fn map<W>(self, f: impl FnOnce(V) -> W) -> Quantity<W> {
        Quantity::new(f(self.value), self.unit)
    }
}

impl Mul<Unit> for f64 {
    type Output = Quantity<f64>;
    fn mul(self, unit: Unit) -> Quantity<f64> {
        Quantity::new(self, unit)
    }
}

impl Mul<f64> for Quantity<f64> {
    type Output = Quantity<f64>;
    fn mul(self, rhs: f64) -> Quantity<f64> {
        Quantity::new(self.value * rhs, self.unit)
    }
}

impl<V> Mul<Unit> for Quantity<V> {
    type Output = Quantity<V>;
    fn mul(self, rhs: Unit) -> Quantity<V> {
        Quantity::new(self.value, self.unit * rhs)
    }
}

impl Mul for Quantity<f64> {
    type Output = Quantity<f64>;
    fn mul(self, rhs: Quantity<f64>) -> Quantity<f64> {
        Quantity::new(self.value * rhs.value, self.unit * rhs.unit)
    }
}

impl<V: fmt::Display> fmt::Display for Quantity<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_dimensionless() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_algebra() {
        let volume = Unit::METER.powi(3);
        assert_eq!(volume.exponents(), [3, 0, 0, 0, 0, 0, 0]);
        assert_eq!(volume / Unit::METER, Unit::METER.powi(2));
        assert!((Unit::AMPERE / Unit::AMPERE).is_dimensionless());
        assert_eq!(Unit::METER.powi(0), Unit::ONE);
    }

    #[test]
    fn test_unit_display() {
        assert_eq!(Unit::ONE.to_string(), "1");
        assert_eq!((Unit::AMPERE * Unit::METER.powi(3)).to_string(), "m^3·A");
        let joule = Unit::KILOGRAM * Unit::METER.powi(2) / Unit::SECOND.powi(2);
        assert_eq!(joule.to_string(), "kg·m^2·s^-2");
    }

    #[test]
    fn test_quantity_ops() {
        let q = 2.0 * Unit::AMPERE;
        assert_eq!(q.value, 2.0);
        let scaled = q * 3.0 * Unit::METER;
        assert_eq!(scaled.value, 6.0);
        assert_eq!(scaled.unit, Unit::AMPERE * Unit::METER);
        assert_eq!((q * q).unit, Unit::AMPERE.powi(2));
        assert_eq!(Quantity::dimensionless(1.5).to_string(), "1.5");
        assert_eq!(q.map(|v| v + 1.0).value, 3.0);
    }

    #[test]
    fn test_quantity_serde() {
        let q = 1.0 * Unit::KELVIN;
        let json = serde_json::to_string(&q).unwrap();
        let back: Quantity<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, q);
    }
}
