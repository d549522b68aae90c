//! Static reference data shown by the registration wizard: the service
//! catalog and the administrative regions (RA) of the Distrito Federal.

use super::draft::UnitOfMeasure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceType {
    pub id: &'static str,
    pub label: &'static str,
    pub unit: UnitOfMeasure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub code: &'static str,
    pub name: &'static str,
}

pub const SERVICES: &[ServiceType] = &[
    ServiceType { id: "aracao", label: "Aração", unit: UnitOfMeasure::Hectare },
    ServiceType { id: "gradagem", label: "Gradagem", unit: UnitOfMeasure::Hectare },
    ServiceType { id: "rocagem", label: "Roçagem", unit: UnitOfMeasure::Hectare },
    ServiceType { id: "subsolagem", label: "Subsolagem", unit: UnitOfMeasure::Hectare },
    ServiceType { id: "plantio", label: "Plantio mecanizado", unit: UnitOfMeasure::Hectare },
    ServiceType { id: "calagem", label: "Distribuição de calcário", unit: UnitOfMeasure::Hectare },
    ServiceType { id: "terraplanagem", label: "Terraplanagem", unit: UnitOfMeasure::SquareMeter },
    ServiceType { id: "cascalhamento", label: "Cascalhamento", unit: UnitOfMeasure::CubicMeter },
    ServiceType { id: "patrolamento", label: "Patrolamento de estradas", unit: UnitOfMeasure::Kilometer },
    ServiceType { id: "limpeza_canal", label: "Limpeza de canal", unit: UnitOfMeasure::Meter },
    ServiceType { id: "bacia_captacao", label: "Bacia de captação", unit: UnitOfMeasure::Unit },
    ServiceType { id: "hora_maquina", label: "Hora máquina", unit: UnitOfMeasure::MachineHour },
];

pub const REGIONS: &[Region] = &[
    Region { code: "I", name: "Plano Piloto" },
    Region { code: "II", name: "Gama" },
    Region { code: "III", name: "Taguatinga" },
    Region { code: "IV", name: "Brazlândia" },
    Region { code: "V", name: "Sobradinho" },
    Region { code: "VI", name: "Planaltina" },
    Region { code: "VII", name: "Paranoá" },
    Region { code: "VIII", name: "Núcleo Bandeirante" },
    Region { code: "IX", name: "Ceilândia" },
    Region { code: "X", name: "Guará" },
    Region { code: "XI", name: "Cruzeiro" },
    Region { code: "XII", name: "Samambaia" },
    Region { code: "XIII", name: "Santa Maria" },
    Region { code: "XIV", name: "São Sebastião" },
    Region { code: "XV", name: "Recanto das Emas" },
    Region { code: "XVI", name: "Lago Sul" },
    Region { code: "XVII", name: "Riacho Fundo" },
    Region { code: "XVIII", name: "Lago Norte" },
    Region { code: "XIX", name: "Candangolândia" },
    Region { code: "XX", name: "Águas Claras" },
    Region { code: "XXI", name: "Riacho Fundo II" },
    Region { code: "XXII", name: "Sudoeste/Octogonal" },
    Region { code: "XXIII", name: "Varjão" },
    Region { code: "XXIV", name: "Park Way" },
    Region { code: "XXV", name: "SCIA/Estrutural" },
    Region { code: "XXVI", name: "Sobradinho II" },
    Region { code: "XXVII", name: "Jardim Botânico" },
    Region { code: "XXVIII", name: "Itapoã" },
    Region { code: "XXIX", name: "SIA" },
    Region { code: "XXX", name: "Vicente Pires" },
    Region { code: "XXXI", name: "Fercal" },
    Region { code: "XXXII", name: "Sol Nascente/Pôr do Sol" },
    Region { code: "XXXIII", name: "Arniqueira" },
];

pub fn find_service(id: &str) -> Option<&'static ServiceType> {
    SERVICES.iter().find(|s| s.id == id)
}

pub fn find_region(code: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.code == code)
}

/// "IX - Ceilândia" for a known code, the raw code otherwise.
pub fn region_full_name(code: &str) -> String {
    match find_region(code) {
        Some(r) => format!("{} - {}", r.code, r.name),
        None => code.to_string(),
    }
}
