// gf-core/src/units.rs

use uom::si::f64::{
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

pub mod constants {
    /// Molar gas constant [J/(mol·K)] (CODATA 2018, exact).
    pub const R_J_PER_MOL_K: f64 = 8.314_462_618;

    /// R·T [J/mol] at temperature `t_k` in kelvin.
    #[inline]
    pub fn rt(t_k: f64) -> f64 {
        R_J_PER_MOL_K * t_k
    }
}
