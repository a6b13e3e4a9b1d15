use std::str::FromStr;

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Measurand {
    #[serde(rename = "Current.Export")]
    CurrentExport,
    #[serde(rename = "Current.Import")]
    CurrentImport,
    #[serde(rename = "Current.Offered")]
    CurrentOffered,
    #[serde(rename = "Energy.Active.Export.Register")]
    EnergyActiveExportRegister,
    #[serde(rename = "Energy.Active.Import.Register")]
    EnergyActiveImportRegister,
    #[serde(rename = "Energy.Reactive.Export.Register")]
    EnergyReactiveExportRegister,
    #[serde(rename = "Energy.Reactive.Import.Register")]
    EnergyReactiveImportRegister,
    #[serde(rename = "Energy.Active.Export.Interval")]
    EnergyActiveExportInterval,
    #[serde(rename = "Energy.Active.Import.Interval")]
    EnergyActiveImportInterval,
    #[serde(rename = "Energy.Reactive.Export.Interval")]
    EnergyReactiveExportInterval,
    #[serde(rename = "Energy.Reactive.Import.Interval")]
    EnergyReactiveImportInterval,
    Frequency,
    #[serde(rename = "Power.Active.Export")]
    PowerActiveExport,
    #[serde(rename = "Power.Active.Import")]
    PowerActiveImport,
    #[serde(rename = "Power.Factor")]
    PowerFactor,
    #[serde(rename = "Power.Offered")]
    PowerOffered,
    #[serde(rename = "Power.Reactive.Export")]
    PowerReactiveExport,
    #[serde(rename = "Power.Reactive.Import")]
    PowerReactiveImport,
    #[serde(rename = "RPM")]
    Rpm,
    SoC,
    Temperature,
    Voltage,
}

impl Measurand {
    pub const ALL: [Measurand; 22] = [
        Measurand::CurrentExport,
        Measurand::CurrentImport,
        Measurand::CurrentOffered,
        Measurand::EnergyActiveExportRegister,
        Measurand::EnergyActiveImportRegister,
        Measurand::EnergyReactiveExportRegister,
        Measurand::EnergyReactiveImportRegister,
        Measurand::EnergyActiveExportInterval,
        Measurand::EnergyActiveImportInterval,
        Measurand::EnergyReactiveExportInterval,
        Measurand::EnergyReactiveImportInterval,
        Measurand::Frequency,
        Measurand::PowerActiveExport,
        Measurand::PowerActiveImport,
        Measurand::PowerFactor,
        Measurand::PowerOffered,
        Measurand::PowerReactiveExport,
        Measurand::PowerReactiveImport,
        Measurand::Rpm,
        Measurand::SoC,
        Measurand::Temperature,
        Measurand::Voltage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Measurand::CurrentExport => "Current.Export",
            Measurand::CurrentImport => "Current.Import",
            Measurand::CurrentOffered => "Current.Offered",
            Measurand::EnergyActiveExportRegister => "Energy.Active.Export.Register",
            Measurand::EnergyActiveImportRegister => "Energy.Active.Import.Register",
            Measurand::EnergyReactiveExportRegister => "Energy.Reactive.Export.Register",
            Measurand::EnergyReactiveImportRegister => "Energy.Reactive.Import.Register",
            Measurand::EnergyActiveExportInterval => "Energy.Active.Export.Interval",
            Measurand::EnergyActiveImportInterval => "Energy.Active.Import.Interval",
            Measurand::EnergyReactiveExportInterval => "Energy.Reactive.Export.Interval",
            Measurand::EnergyReactiveImportInterval => "Energy.Reactive.Import.Interval",
            Measurand::Frequency => "Frequency",
            Measurand::PowerActiveExport => "Power.Active.Export",
            Measurand::PowerActiveImport => "Power.Active.Import",
            Measurand::PowerFactor => "Power.Factor",
            Measurand::PowerOffered => "Power.Offered",
            Measurand::PowerReactiveExport => "Power.Reactive.Export",
            Measurand::PowerReactiveImport => "Power.Reactive.Import",
            Measurand::Rpm => "RPM",
            Measurand::SoC => "SoC",
            Measurand::Temperature => "Temperature",
            Measurand::Voltage => "Voltage",
        }
    }
}

impl FromStr for Measurand {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Measurand::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or(())
    }
}
