use bo_core::{Evaluation, RegionIdx};
use tracing::debug;

use crate::error::{PvtError, PvtResult};
use crate::model::{OilPvt, PvtModel, VaporizationControl, ensure_positive_samples, region_data};
use crate::records::{LiveOilTable, PvtPoint, PvtoRow};
use crate::tabulated::{Tabulated1D, UniformXTabulated2D, relative_step};

#[derive(Debug, Clone, PartialEq)]
struct LiveOilRegion {
    /// Saturated Rs as a function of the bubble-point pressure.
    saturated_rs: Tabulated1D,
    /// `1/Bo(Rs, p)`
    inv_b: UniformXTabulated2D,
    /// `1/(Bo mu)(Rs, p)`
    inv_b_mu: UniformXTabulated2D,
}

/// Oil with dissolved gas (PVTO).
///
/// Each table row is a column at fixed Rs over pressure, starting at its
/// bubble point. The saturated quantities are the undersaturated tables
/// evaluated at the saturated Rs.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveOilPvt {
    regions: Vec<LiveOilRegion>,
    vaporization: VaporizationControl,
}

impl LiveOilPvt {
    /// Build from per-region SI tables.
    ///
    /// Rows that only carry their saturated point are extended with the
    /// undersaturated shape of the nearest row that has one.
    pub fn new(tables: &[LiveOilTable]) -> PvtResult<Self> {
        if tables.is_empty() {
            return Err(PvtError::InvalidArg {
                what: "live oil needs at least one PVT region",
            });
        }
        let regions = tables
            .iter()
            .enumerate()
            .map(|(region, t)| live_oil_region(region, t))
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

    pub fn vaporization_control(&self) -> VaporizationControl {
        self.vaporization
    }

    fn region(&self, region: RegionIdx) -> &LiveOilRegion {
        region_data(&self.regions, region, "LiveOil")
    }
}

fn live_oil_region(region: RegionIdx, table: &LiveOilTable) -> PvtResult<LiveOilRegion> {
    const WHAT: &str = "PVTO";
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

    let rs: Vec<f64> = rows.iter().map(|r| r.rs).collect();
    let saturated_rs = Tabulated1D::new(
        "PVTO bubble-point pressure",
        rows.iter().map(|r| r.points[0].pressure).collect(),
        rs.clone(),
    )?;

    let mut inv_b = Vec::with_capacity(rows.len());
    let mut inv_b_mu = Vec::with_capacity(rows.len());
    for row in &rows {
        let p: Vec<f64> = row.points.iter().map(|pt| pt.pressure).collect();
        inv_b.push(Tabulated1D::new(
            "PVTO pressure",
            p.clone(),
            row.points.iter().map(|pt| 1.0 / pt.fvf).collect(),
        )?);
        inv_b_mu.push(Tabulated1D::new(
            "PVTO pressure",
            p,
            row.points
                .iter()
                .map(|pt| 1.0 / (pt.fvf * pt.viscosity))
                .collect(),
        )?);
    }

    Ok(LiveOilRegion {
        saturated_rs,
        inv_b: UniformXTabulated2D::new("PVTO Rs", rs.clone(), inv_b)?,
        inv_b_mu: UniformXTabulated2D::new("PVTO Rs", rs, inv_b_mu)?,
    })
}

/// Give every saturated-only row the relative undersaturated behaviour of a master row.
///
/// The master is the next row at higher Rs with undersaturated data, or the
/// closest one below if there is none above. Each master step `j-1 -> j`
/// adds a pressure increment and scales FVF and viscosity by
/// `(1 + x/2) / (1 - x/2)` with `x` the relative master change.
fn extend_rows(region: RegionIdx, rows: &[PvtoRow]) -> PvtResult<Vec<PvtoRow>> {
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
                what: "PVTO",
                region,
            })?;
        debug!(
            region,
            rs = row.rs,
            master_rs = master.rs,
            "extending saturated-only PVTO row"
        );
        for w in master.points.windows(2) {
            let last = row.points[row.points.len() - 1];
            row.points.push(PvtPoint {
                pressure: last.pressure + (w[1].pressure - w[0].pressure),
                fvf: last.fvf * relative_step(w[0].fvf, w[1].fvf),
                viscosity: last.viscosity * relative_step(w[0].viscosity, w[1].viscosity),
            });
        }
    }
    Ok(out)
}

impl PvtModel for LiveOilPvt {
    fn name(&self) -> &'static str {
        "LiveOil"
    }

    fn num_regions(&self) -> usize {
        self.regions.len()
    }

    fn inverse_formation_volume_factor<E: Evaluation>(
        &self,
        region: RegionIdx,
        _temperature: E,
        pressure: E,
        rs: E,
    ) -> E {
        self.region(region).inv_b.eval(rs, pressure)
    }

    fn viscosity<E: Evaluation>(&self, region: RegionIdx, _temperature: E, pressure: E, rs: E) -> E {
        let r = self.region(region);
        r.inv_b.eval(rs, pressure) / r.inv_b_mu.eval(rs, pressure)
    }

    fn saturated_dissolution_factor<E: Evaluation>(
        &self,
        region: RegionIdx,
        _temperature: E,
        pressure: E,
    ) -> E {
        self.region(region).saturated_rs.eval(pressure)
    }

    fn saturated_dissolution_factor_with_saturation<E: Evaluation>(
        &self,
        region: RegionIdx,
        temperature: E,
        pressure: E,
        oil_saturation: E,
        max_oil_saturation: E,
    ) -> E {
        let rs = self.saturated_dissolution_factor(region, temperature, pressure);
        self.vaporization.apply(rs, oil_saturation, max_oil_saturation)
    }

    fn saturation_pressure<E: Evaluation>(&self, region: RegionIdx, _temperature: E, rs: E) -> E {
        self.region(region).saturated_rs.eval_inverse(rs)
    }
}

impl OilPvt for LiveOilPvt {}
