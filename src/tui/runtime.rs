//! Calculator form state and pipeline re-evaluation.

use crate::config::Scenario;
use crate::error::CalcError;
use crate::load::catalog::{DEFAULT_HOURS_PER_DAY, DEFAULT_QUANTITY};
use crate::load::entry::{MAX_HOURS_PER_DAY, MAX_POWER_WATTS, MAX_QUANTITY};
use crate::load::{DevicePreset, LoadLedger, LoadSummary, TariffRate};
use crate::simulation::{SimulationReport, SolarInputs, evaluate};
use crate::solar::system::{
    BATTERY_KWH_RANGE, PANEL_COUNT_RANGE, PANEL_WATT_PEAK_RANGE, system_kwp,
};
use crate::solar::{
    BatteryBank, BatteryType, GridConnection, Phase, Region, SiteProfile, SystemConfig,
    SystemMode, TechnicalParams, size_battery_suggestion,
};

const POWER_STEP: f64 = 10.0;
const MIN_POWER_WATTS: f64 = 1.0;
const HOURS_STEP: f64 = 0.5;
const TARIFF_STEP: f64 = 50.0;
const PANEL_WP_STEP: u32 = 10;
const BATTERY_STEP_KWH: f64 = 0.5;

/// Editable form rows, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Device,
    Power,
    Hours,
    Quantity,
    Tariff,
    Region,
    GridVa,
    Phase,
    Mode,
    PanelWattPeak,
    PanelCount,
    BatteryType,
    BatteryKwh,
    Tilt,
    Shading,
    Efficiency,
}

impl Field {
    pub const ALL: [Self; 16] = [
        Self::Device,
        Self::Power,
        Self::Hours,
        Self::Quantity,
        Self::Tariff,
        Self::Region,
        Self::GridVa,
        Self::Phase,
        Self::Mode,
        Self::PanelWattPeak,
        Self::PanelCount,
        Self::BatteryType,
        Self::BatteryKwh,
        Self::Tilt,
        Self::Shading,
        Self::Efficiency,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Device => "Perangkat",
            Self::Power => "Daya (Watt)",
            Self::Hours => "Jam/hari",
            Self::Quantity => "Jumlah",
            Self::Tariff => "Tarif (Rp/kWh)",
            Self::Region => "Wilayah",
            Self::GridVa => "Daya PLN",
            Self::Phase => "Fasa",
            Self::Mode => "Jenis sistem",
            Self::PanelWattPeak => "Watt per panel",
            Self::PanelCount => "Jumlah panel",
            Self::BatteryType => "Tipe baterai",
            Self::BatteryKwh => "Baterai (kWh)",
            Self::Tilt => "Tilt",
            Self::Shading => "Shading loss",
            Self::Efficiency => "Efisiensi",
        }
    }

    /// Battery rows only apply to topologies with storage.
    pub fn is_enabled(self, mode: SystemMode) -> bool {
        !matches!(self, Self::BatteryType | Self::BatteryKwh) || mode.uses_battery()
    }
}

/// Current value of every form control.
///
/// Adjustments step within each control's range, so the form never holds a
/// value the model would reject.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub device_idx: usize,
    /// Per-unit wattage of the next device; prefilled from the catalog.
    pub power_watts: f64,
    pub hours_per_day: f64,
    pub quantity: u32,
    pub tariff: f64,
    pub region: Region,
    pub grid: GridConnection,
    pub phase: Phase,
    pub mode: SystemMode,
    pub panel_watt_peak: u32,
    pub panel_count: u32,
    pub battery_type: BatteryType,
    pub battery_kwh: f64,
    pub tilt_deg: f64,
    pub shading_loss_pct: f64,
    pub efficiency_pct: f64,
}

impl Form {
    fn from_scenario(scenario: &Scenario) -> Self {
        let solar = &scenario.solar;
        let system = &solar.system;
        let mut form = Self {
            device_idx: 0,
            power_watts: DevicePreset::ALL[0].watts(),
            hours_per_day: DEFAULT_HOURS_PER_DAY,
            quantity: DEFAULT_QUANTITY,
            tariff: scenario.tariff.per_kwh(),
            region: solar.site.region,
            grid: solar.site.grid,
            phase: solar.site.phase,
            mode: system.mode(),
            panel_watt_peak: system.panel_watt_peak(),
            panel_count: system.panel_count(),
            battery_type: system.battery_type().unwrap_or_default(),
            battery_kwh: system.battery_kwh(),
            tilt_deg: solar.technical.tilt_deg(),
            shading_loss_pct: solar.technical.shading_loss_pct(),
            efficiency_pct: solar.technical.efficiency_pct(),
        };
        if !form.mode.uses_battery() {
            form.battery_kwh = form.suggested_battery_kwh();
        }
        form
    }

    pub fn device(&self) -> DevicePreset {
        DevicePreset::ALL[self.device_idx]
    }

    /// Topology default capacity, limited to the selectable range.
    pub fn suggested_battery_kwh(&self) -> f64 {
        let (min, max) = BATTERY_KWH_RANGE;
        let kwp = system_kwp(self.panel_watt_peak, self.panel_count);
        let mode = if self.mode.uses_battery() {
            self.mode
        } else {
            SystemMode::Hybrid
        };
        size_battery_suggestion(kwp, mode).clamp(min, max)
    }

    /// Moves the value of `field` by `delta` steps, staying within range.
    fn adjust(&mut self, field: Field, delta: i32) {
        let d = f64::from(delta);
        match field {
            Field::Device => {
                self.device_idx = cycle(self.device_idx, DevicePreset::ALL.len(), delta);
                self.power_watts = self.device().watts();
            }
            Field::Power => {
                self.power_watts =
                    (self.power_watts + d * POWER_STEP).clamp(MIN_POWER_WATTS, MAX_POWER_WATTS);
            }
            Field::Hours => {
                self.hours_per_day = (self.hours_per_day + d * HOURS_STEP).clamp(0.0, MAX_HOURS_PER_DAY);
            }
            Field::Quantity => self.quantity = step_u32(self.quantity, delta, 1, (1, MAX_QUANTITY)),
            Field::Tariff => self.tariff = (self.tariff + d * TARIFF_STEP).max(0.0),
            Field::Region => {
                let idx = Region::ALL.iter().position(|r| *r == self.region).unwrap_or(0);
                self.region = Region::ALL[cycle(idx, Region::ALL.len(), delta)];
            }
            Field::GridVa => {
                self.grid = if delta > 0 { self.grid.next() } else { self.grid.prev() };
            }
            Field::Phase => {
                self.phase = match self.phase {
                    Phase::Single => Phase::Three,
                    Phase::Three => Phase::Single,
                };
            }
            Field::Mode => {
                let idx = SystemMode::ALL.iter().position(|m| *m == self.mode).unwrap_or(0);
                self.mode = SystemMode::ALL[cycle(idx, SystemMode::ALL.len(), delta)];
                self.battery_kwh = self.suggested_battery_kwh();
            }
            Field::PanelWattPeak => {
                self.panel_watt_peak =
                    step_u32(self.panel_watt_peak, delta, PANEL_WP_STEP, PANEL_WATT_PEAK_RANGE);
            }
            Field::PanelCount => {
                self.panel_count = step_u32(self.panel_count, delta, 1, PANEL_COUNT_RANGE);
            }
            Field::BatteryType => {
                self.battery_type = match self.battery_type {
                    BatteryType::Lithium => BatteryType::LeadAcid,
                    BatteryType::LeadAcid => BatteryType::Lithium,
                };
            }
            Field::BatteryKwh => {
                let (min, max) = BATTERY_KWH_RANGE;
                self.battery_kwh = (self.battery_kwh + d * BATTERY_STEP_KWH).clamp(min, max);
            }
            Field::Tilt => self.tilt_deg = (self.tilt_deg + d).clamp(0.0, 45.0),
            Field::Shading => self.shading_loss_pct = (self.shading_loss_pct + d).clamp(0.0, 50.0),
            Field::Efficiency => self.efficiency_pct = (self.efficiency_pct + d).clamp(60.0, 95.0),
        }
    }

    fn tariff_rate(&self) -> Result<TariffRate, CalcError> {
        TariffRate::new(self.tariff)
    }

    fn solar_inputs(&self) -> Result<SolarInputs, CalcError> {
        let battery = if self.mode.uses_battery() {
            Some(BatteryBank::new(self.battery_type, self.battery_kwh)?)
        } else {
            None
        };
        Ok(SolarInputs {
            site: SiteProfile {
                grid: self.grid,
                phase: self.phase,
                region: self.region,
            },
            system: SystemConfig::new(self.mode, self.panel_watt_peak, self.panel_count, battery)?,
            technical: TechnicalParams::new(self.tilt_deg, self.shading_loss_pct, self.efficiency_pct)?,
        })
    }
}

fn cycle(idx: usize, len: usize, delta: i32) -> usize {
    if delta >= 0 {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    }
}

fn step_u32(value: u32, delta: i32, step: u32, (min, max): (u32, u32)) -> u32 {
    if delta >= 0 {
        value.saturating_add(step).min(max)
    } else {
        value.saturating_sub(step).max(min)
    }
}

/// TUI application state.
pub struct App {
    /// Appliances added so far.
    pub ledger: LoadLedger,
    pub form: Form,
    /// Index into [`Field::ALL`] of the highlighted row.
    pub selected: usize,
    /// Projection length for the cashflow chart.
    pub horizon_years: u32,
    /// Ledger totals at the current tariff.
    pub summary: LoadSummary,
    /// Latest model output, `None` while the ledger is empty.
    pub report: Option<SimulationReport>,
    /// Last rejected action, shown in the footer.
    pub status: Option<String>,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Creates the app pre-filled from a loaded scenario.
    pub fn new(scenario: Scenario) -> Self {
        let form = Form::from_scenario(&scenario);
        let summary = scenario.summary();
        let mut app = Self {
            ledger: scenario.ledger,
            form,
            selected: 0,
            horizon_years: scenario.horizon_years,
            summary,
            report: None,
            status: None,
            quit: false,
        };
        app.refresh();
        app
    }

    pub fn selected_field(&self) -> Field {
        Field::ALL[self.selected]
    }

    /// Moves the highlight, skipping rows that do not apply to the topology.
    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    pub fn select_prev(&mut self) {
        self.move_selection(-1);
    }

    fn move_selection(&mut self, delta: i32) {
        let len = Field::ALL.len();
        for _ in 0..len {
            self.selected = cycle(self.selected, len, delta);
            if self.selected_field().is_enabled(self.form.mode) {
                break;
            }
        }
    }

    /// Steps the highlighted control up (`delta > 0`) or down.
    pub fn adjust(&mut self, delta: i32) {
        let field = self.selected_field();
        if !field.is_enabled(self.form.mode) {
            return;
        }
        self.form.adjust(field, delta);
        self.refresh();
    }

    /// Appends the selected catalog appliance with the form power, hours and
    /// quantity.
    pub fn add_device(&mut self) {
        let form = &self.form;
        if let Err(e) = self.ledger.add_device(
            form.device().label(),
            form.power_watts,
            form.hours_per_day,
            form.quantity,
        ) {
            self.status = Some(e.to_string());
            return;
        }
        self.status = None;
        self.refresh();
    }

    /// Clears the ledger.
    pub fn reset_ledger(&mut self) {
        self.ledger.reset();
        self.status = None;
        self.refresh();
    }

    /// Re-runs the ledger summary and the solar model for the current form.
    pub fn refresh(&mut self) {
        let evaluated = self.form.tariff_rate().and_then(|tariff| {
            let inputs = self.form.solar_inputs()?;
            let summary = self.ledger.summary(tariff);
            let report = evaluate(&summary, tariff, &inputs, self.horizon_years);
            Ok((summary, report))
        });
        match evaluated {
            Ok((summary, report)) => {
                self.summary = summary;
                self.report = report;
                self.status = None;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }
}
