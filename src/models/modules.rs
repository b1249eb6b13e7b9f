use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleStatus {
    Active,
    Processing,
    Standby,
}

impl fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleStatus::Active => write!(f, "active"),
            ModuleStatus::Processing => write!(f, "processing"),
            ModuleStatus::Standby => write!(f, "standby"),
        }
    }
}

/// A tile in the "intelligence modules" footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntelligenceModule {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub status: ModuleStatus,
    pub metrics: &'static str,
}

pub static FOOTER_MODULES: [IntelligenceModule; 8] = [
    IntelligenceModule {
        id: "supply-chain",
        name: "Supply Chain Intelligence",
        icon: "🕸",
        status: ModuleStatus::Active,
        metrics: "847 nodes",
    },
    IntelligenceModule {
        id: "compliance",
        name: "Compliance Monitor",
        icon: "🛡",
        status: ModuleStatus::Active,
        metrics: "99.2% coverage",
    },
    IntelligenceModule {
        id: "analytics",
        name: "Performance Analytics",
        icon: "📊",
        status: ModuleStatus::Processing,
        metrics: "12.4K events/min",
    },
    IntelligenceModule {
        id: "automation",
        name: "Industrial Automation",
        icon: "⚙",
        status: ModuleStatus::Active,
        metrics: "156 processes",
    },
    IntelligenceModule {
        id: "market",
        name: "Market Intelligence",
        icon: "🌐",
        status: ModuleStatus::Standby,
        metrics: "24/7 monitoring",
    },
    IntelligenceModule {
        id: "optimization",
        name: "Process Optimization",
        icon: "⚡",
        status: ModuleStatus::Active,
        metrics: "18% efficiency gain",
    },
    IntelligenceModule {
        id: "predictive",
        name: "Predictive Analytics",
        icon: "🧠",
        status: ModuleStatus::Processing,
        metrics: "94.7% accuracy",
    },
    IntelligenceModule {
        id: "data-lake",
        name: "Enterprise Data Lake",
        icon: "🗄",
        status: ModuleStatus::Active,
        metrics: "2.3TB processed",
    },
];

pub fn count_by_status(status: ModuleStatus) -> usize {
    FOOTER_MODULES.iter().filter(|m| m.status == status).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_counts() {
        assert_eq!(count_by_status(ModuleStatus::Active), 5);
        assert_eq!(count_by_status(ModuleStatus::Processing), 2);
        assert_eq!(count_by_status(ModuleStatus::Standby), 1);
    }
}
