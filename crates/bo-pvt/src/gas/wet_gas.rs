use bo_core::{Evaluation, RegionIdx};
use tracing::debug;

use crate::error::{PvtError, PvtResult};
use crate::model::{GasPvt, PvtModel, VaporizationControl, ensure_positive_samples, region_data};
use crate::records::{PvtgRow, RatioPoint, WetGasTable};
use crate::tabulated::{Tabulated1D, UniformXTabulated2D, relative_step};

#[derive(Debug, Clone, PartialEq)]
struct WetGasRegion {
    /// Saturated Rv as a function of pressure.
    saturated_rv: Tabulated1D,
    /// `1/Bg(p, Rv)`
    inv_b: UniformXTabulated2D,
    /// `1/(Bg mu)(p, Rv)`
    inv_b_mu: UniformXTabulated2D,
}

/// Gas with vaporized oil (PVTG).
///
/// Table rows are pressure nodes; each row is a column over Rv whose
/// largest Rv is the saturated one.
#[derive(Debug, Clone, PartialEq)]
pub struct WetGasPvt {
    regions: Vec<WetGasRegion>,
    vaporization: VaporizationControl,
}

impl WetGasPvt {
    pub fn new(tables: &[WetGasTable]) -> PvtResult<Self> {
        if tables.is_empty() {
            return Err(PvtError::InvalidArg {
                what: "wet gas needs at least one PVT region",
            });
        }
        let regions = tables
            .iter()
            .enumerate()
            .map(|(region, t)| wet_gas_region(region, t))
            .collect::<PvtResult<Vec<_>>>()?;
        Ok(Self {
            regions,
            vaporization: VaporizationControl::default(),
        })
    }

    pub fn with_vaporization_control(mut self, vaporization: VaporizationControl) -> Self {
        self.vaporization = vaporization;
        self
    }

    fn region(&self, region: RegionIdx) -> &WetGasRegion {
        region_data(&self.regions, region, "WetGas")
    }
}

fn wet_gas_region(region: RegionIdx, table: &WetGasTable) -> PvtResult<WetGasRegion> {
    const WHAT: &str = "PVTG";
    if table.rows.len() < 2 {
        return Err(PvtError::TooFewSamples {
            what: WHAT,
            min: 2,
            got: table.rows.len(),
        });
    }
    for row in &table.rows {
        if row.points.is_empty() {
            return Err(PvtError::TooFewSamples {
                what: WHAT,
                min: 1,
                got: 0,
            });
        }
        let fvf: Vec<f64> = row.points.iter().map(|p| p.fvf).collect();
        let mu: Vec<f64> = row.points.iter().map(|p| p.viscosity).collect();
        ensure_positive_samples(&fvf, WHAT, region)?;
        ensure_positive_samples(&mu, WHAT, region)?;
    }

    let rows = extend_rows(region, &table.rows)?;

    let pressure: Vec<f64> = rows.iter().map(|r| r.pressure).collect();
    let saturated_rv = Tabulated1D::new(
        "PVTG pressure",
        pressure.clone(),
        rows.iter().map(|r| r.points[0].ratio).collect(),
    )?;
    if let Some(i) = saturated_rv.ys().windows(2).position(|w| w[1] < w[0]) {
        return Err(PvtError::NonMonotonicSaturatedLine {
            what: "oil vaporization factor",
            region,
            pressure: pressure[i + 1],
        });
    }

    let mut inv_b = Vec::with_capacity(rows.len());
    let mut inv_b_mu = Vec::with_capacity(rows.len());
    for row in &rows {
        // rows list Rv from saturated downwards; tables need increasing keys
        let points: Vec<RatioPoint> = row.points.iter().rev().copied().collect();
        let rv: Vec<f64> = points.iter().map(|pt| pt.ratio).collect();
        inv_b.push(Tabulated1D::new(
            "PVTG Rv",
            rv.clone(),
            points.iter().map(|pt| 1.0 / pt.fvf).collect(),
        )?);
        inv_b_mu.push(Tabulated1D::new(
            "PVTG Rv",
            rv,
            points
                .iter()
                .map(|pt| 1.0 / (pt.fvf * pt.viscosity))
                .collect(),
        )?);
    }

    Ok(WetGasRegion {
        saturated_rv,
        inv_b: UniformXTabulated2D::new("PVTG pressure", pressure.clone(), inv_b)?,
        inv_b_mu: UniformXTabulated2D::new("PVTG pressure", pressure, inv_b_mu)?,
    })
}

/// Extend saturated-only rows with the Rv steps and relative FVF/viscosity
/// changes of the nearest row with undersaturated data (higher pressure first).
fn extend_rows(region: RegionIdx, rows: &[PvtgRow]) -> PvtResult<Vec<PvtgRow>> {
    let mut out = rows.to_vec();
    for (i, row) in out.iter_mut().enumerate() {
        if row.points.len() > 1 {
            continue;
        }
        let master = rows[i + 1..]
            .iter()
            .find(|r| r.points.len() > 1)
            .or_else(|| rows[..i].iter().rev().find(|r| r.points.len() > 1))
            .ok_or(PvtError::MissingUndersaturatedData {
                what: "PVTG",
                region,
            })?;
        debug!(
            region,
            pressure = row.pressure,
            master_pressure = master.pressure,
            "extending saturated-only PVTG row"
        );
        for w in master.points.windows(2) {
            let last = row.points[row.points.len() - 1];
            row.points.push(RatioPoint {
                ratio: last.ratio + (w[1].ratio - w[0].ratio),
                fvf: last.fvf * relative_step(w[0].fvf, w[1].fvf),
                viscosity: last.viscosity * relative_step(w[0].viscosity, w[1].viscosity),
            });
        }
    }
    Ok(out)
}

impl PvtModel for WetGasPvt {
    fn name(&self) -> &'static str {
        "WetGas"
    }

    fn num_regions(&self) -> usize {
        self.regions.len()
    }

    fn inverse_formation_volume_factor<E: Evaluation>(
        &self,
        region: RegionIdx,
        _temperature: E,
        pressure: E,
        rv: E,
    ) -> E {
        self.region(region).inv_b.eval(pressure, rv)
    }

    fn viscosity<E: Evaluation>(&self, region: RegionIdx, _temperature: E, pressure: E, rv: E) -> E {
        let r = self.region(region);
        r.inv_b.eval(pressure, rv) / r.inv_b_mu.eval(pressure, rv)
    }

    fn saturated_dissolution_factor<E: Evaluation>(
        &self,
        region: RegionIdx,
        _temperature: E,
        pressure: E,
    ) -> E {
        self.region(region).saturated_rv.eval(pressure)
    }

    fn saturated_dissolution_factor_with_saturation<E: Evaluation>(
        &self,
        region: RegionIdx,
        temperature: E,
        pressure: E,
        oil_saturation: E,
        max_oil_saturation: E,
    ) -> E {
        let rv = self.saturated_dissolution_factor(region, temperature, pressure);
        self.vaporization.apply(rv, oil_saturation, max_oil_saturation)
    }

    fn saturation_pressure<E: Evaluation>(&self, region: RegionIdx, _temperature: E, rv: E) -> E {
        self.region(region).saturated_rv.eval_inverse(rv)
    }
}

impl GasPvt for WetGasPvt {}
