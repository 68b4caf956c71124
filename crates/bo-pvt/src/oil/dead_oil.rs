use bo_core::{Evaluation, RegionIdx};

use crate::error::{PvtError, PvtResult};
use crate::model::{OilPvt, PvtModel, ensure_positive_samples, region_data};
use crate::records::DeadTableRecord;
use crate::tabulated::Tabulated1D;

#[derive(Debug, Clone, PartialEq)]
struct DeadOilRegion {
    /// `1/Bo(p)`
    inv_b: Tabulated1D,
    /// `1/(Bo mu)(p)`
    inv_b_mu: Tabulated1D,
}

/// Oil without dissolved gas (PVDO).
///
/// `1/B` and `1/(B mu)` are interpolated in pressure; the viscosity is their
/// ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct DeadOilPvt {
    regions: Vec<DeadOilRegion>,
}

impl DeadOilPvt {
    /// Build from per-region SI tables.
    pub fn new(tables: &[DeadTableRecord]) -> PvtResult<Self> {
        if tables.is_empty() {
            return Err(PvtError::InvalidArg {
                what: "dead oil needs at least one PVT region",
            });
        }
        let regions = tables
            .iter()
            .enumerate()
            .map(|(region, t)| dead_region(region, t, "PVDO"))
            .collect::<PvtResult<Vec<_>>>()?;
        Ok(Self {
            regions: regions
                .into_iter()
                .map(|(inv_b, inv_b_mu)| DeadOilRegion { inv_b, inv_b_mu })
                .collect(),
        })
    }

    fn region(&self, region: RegionIdx) -> &DeadOilRegion {
        region_data(&self.regions, region, "DeadOil")
    }
}

/// `(1/B, 1/(B mu))` tables of a pressure-indexed table without dissolution.
pub(crate) fn dead_region(
    region: RegionIdx,
    t: &DeadTableRecord,
    what: &'static str,
) -> PvtResult<(Tabulated1D, Tabulated1D)> {
    ensure_positive_samples(&t.fvf, what, region)?;
    ensure_positive_samples(&t.viscosity, what, region)?;
    if t.viscosity.len() != t.fvf.len() {
        return Err(PvtError::LengthMismatch {
            what,
            keys: t.fvf.len(),
            values: t.viscosity.len(),
        });
    }
    let inv_b = t.fvf.iter().map(|b| 1.0 / b).collect();
    let inv_b_mu = t
        .fvf
        .iter()
        .zip(&t.viscosity)
        .map(|(b, mu)| 1.0 / (b * mu))
        .collect();
    Ok((
        Tabulated1D::new(what, t.pressure.clone(), inv_b)?,
        Tabulated1D::new(what, t.pressure.clone(), inv_b_mu)?,
    ))
}

impl PvtModel for DeadOilPvt {
    fn name(&self) -> &'static str {
        "DeadOil"
    }

    fn num_regions(&self) -> usize {
        self.regions.len()
    }

    fn inverse_formation_volume_factor<E: Evaluation>(
        &self,
        region: RegionIdx,
        _temperature: E,
        pressure: E,
        _rs: E,
    ) -> E {
        self.region(region).inv_b.eval(pressure)
    }

    fn viscosity<E: Evaluation>(&self, region: RegionIdx, _temperature: E, pressure: E, _rs: E) -> E {
        let r = self.region(region);
        r.inv_b.eval(pressure) / r.inv_b_mu.eval(pressure)
    }

    fn saturated_dissolution_factor<E: Evaluation>(
        &self,
        region: RegionIdx,
        _temperature: E,
        _pressure: E,
    ) -> E {
        let _ = self.region(region);
        E::zero()
    }

    fn saturation_pressure<E: Evaluation>(&self, region: RegionIdx, _temperature: E, _rs: E) -> E {
        let _ = self.region(region);
        E::zero()
    }
}

impl OilPvt for DeadOilPvt {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pvdo() -> DeadTableRecord {
        DeadTableRecord {
            pressure: vec![1.0e6, 1.0e7, 4.0e7],
            fvf: vec![1.10, 1.08, 1.05],
            viscosity: vec![1.2e-3, 1.3e-3, 1.5e-3],
        }
    }

    #[test]
    fn reproduces_table_points() {
        let pvt = DeadOilPvt::new(&[pvdo()]).unwrap();
        let b = pvt.inverse_formation_volume_factor(0, 273.0, 1.0e7, 0.0);
        assert_relative_eq!(b, 1.0 / 1.08, max_relative = 1e-12);
        let mu = pvt.viscosity(0, 273.0, 4.0e7, 0.0);
        assert_relative_eq!(mu, 1.5e-3, max_relative = 1e-12);
    }

    #[test]
    fn no_dissolution() {
        let pvt = DeadOilPvt::new(&[pvdo()]).unwrap();
        assert_eq!(pvt.saturated_gas_dissolution_factor(0, 273.0, 2.0e7), 0.0);
        assert_eq!(pvt.saturation_pressure(0, 273.0, 10.0), 0.0);
        // saturated and undersaturated branches coincide
        assert_eq!(
            pvt.saturated_inverse_formation_volume_factor(0, 273.0, 2.0e7),
            pvt.inverse_formation_volume_factor(0, 273.0, 2.0e7, 0.0)
        );
    }

    #[test]
    fn rejects_negative_fvf() {
        let mut t = pvdo();
        t.fvf[1] = -1.0;
        assert!(matches!(
            DeadOilPvt::new(&[pvdo(), t]),
            Err(PvtError::NonPhysical { region: 1, .. })
        ));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn invalid_region_panics() {
        let pvt = DeadOilPvt::new(&[pvdo()]).unwrap();
        let _ = pvt.viscosity(1, 273.0, 1.0e7, 0.0);
    }
}
