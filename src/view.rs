use std::fmt;
use std::path::PathBuf;

use crate::analysis::{CorrelationMatrix, IndexForecast, forecast_indices};
use crate::config::DashboardConfig;
use crate::data::model::ObservationTable;

// ---------------------------------------------------------------------------
// Section – one entry of the navigation sidebar
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Home,
    KnowledgeBase,
    CarbonFootprint,
    Stakeholders,
    TimeSeries,
    Correlation,
    Spatial,
}

impl Section {
    /// Sidebar order.
    pub const ALL: [Section; 7] = [
        Section::Home,
        Section::KnowledgeBase,
        Section::CarbonFootprint,
        Section::Stakeholders,
        Section::TimeSeries,
        Section::Correlation,
        Section::Spatial,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::KnowledgeBase => "Peatland Knowledge Base",
            Section::CarbonFootprint => "Carbon Footprint Analysis",
            Section::Stakeholders => "Stakeholder Connections",
            Section::TimeSeries => "Time Series Analysis",
            Section::Correlation => "Correlation Analysis",
            Section::Spatial => "Spatial and Clustering Analysis",
        }
    }

    /// Exact label match; anything else is not a section.
    pub fn from_label(label: &str) -> Option<Section> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ContentBlock – what the central panel shows
// ---------------------------------------------------------------------------

/// An image on disk with an optional caption.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub path: PathBuf,
    pub caption: Option<String>,
}

/// Rendering-independent description of a section's content.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Hero {
        title: &'static str,
        image: Figure,
        blurb: &'static str,
    },
    Text {
        heading: &'static str,
        body: &'static str,
    },
    Forecasts {
        heading: &'static str,
        forecasts: Vec<IndexForecast>,
    },
    Correlation {
        heading: &'static str,
        matrix: CorrelationMatrix,
    },
    Figures {
        heading: &'static str,
        figures: Vec<Figure>,
    },
}

impl ContentBlock {
    /// Images this block displays.
    pub fn figures(&self) -> Vec<&Figure> {
        match self {
            ContentBlock::Hero { image, .. } => vec![image],
            ContentBlock::Figures { figures, .. } => figures.iter().collect(),
            _ => Vec::new(),
        }
    }
}

/// Resolve a sidebar label to its content; `None` for unknown labels.
pub fn route(label: &str, table: &ObservationTable, config: &DashboardConfig) -> Option<ContentBlock> {
    Section::from_label(label).map(|section| build(section, table, config))
}

/// Produce the content block for `section`.
pub fn build(section: Section, table: &ObservationTable, config: &DashboardConfig) -> ContentBlock {
    match section {
        Section::Home => ContentBlock::Hero {
            title: "Welcome to Peatland Monitoring",
            image: Figure {
                path: config.image_path(&config.hero_image),
                caption: None,
            },
            blurb: "Explore our resources and analyses related to peatland health and restoration efforts.",
        },
        Section::KnowledgeBase => ContentBlock::Text {
            heading: "Peatland Knowledge Base",
            body: "Welcome to the peatland knowledge base section where you can learn about peatland ecosystems...",
        },
        Section::CarbonFootprint => ContentBlock::Text {
            heading: "Carbon Footprint Analysis",
            body: "This section provides tools for calculating and analyzing carbon footprints related to peatland activities...",
        },
        Section::Stakeholders => ContentBlock::Text {
            heading: "Stakeholder Connections",
            body: "Connect with stakeholders involved in peatland monitoring and restoration efforts...",
        },
        Section::TimeSeries => ContentBlock::Forecasts {
            heading: "ARIMA Time Series Forecasting",
            forecasts: forecast_indices(table, config.forecast_order, config.forecast_horizon),
        },
        Section::Correlation => ContentBlock::Correlation {
            heading: "Correlation Analysis",
            matrix: CorrelationMatrix::from_table(table),
        },
        Section::Spatial => ContentBlock::Figures {
            heading: "Spatial and Clustering Analysis",
            figures: [
                (&config.ndmi_diff_map, "NDMI Difference Map"),
                (&config.ndwi_diff_map, "NDWI Difference Map"),
                (&config.ndvi_diff_map, "NDVI Difference Map"),
            ]
            .into_iter()
            .map(|(file, caption)| Figure {
                path: config.image_path(file),
                caption: Some(caption.to_string()),
            })
            .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route_default(label: &str) -> Option<ContentBlock> {
        route(label, &ObservationTable::peatland_site(), &DashboardConfig::default())
    }

    #[test]
    fn every_label_routes_to_one_block() {
        for section in Section::ALL {
            let block = route_default(section.label());
            assert!(block.is_some(), "{section} produced no content");
        }
    }

    #[test]
    fn unknown_labels_route_nowhere() {
        for label in ["", "home", "Settings", "Time Series Analysis ", "Correlation"] {
            assert_eq!(route_default(label), None, "{label:?}");
        }
    }

    #[test]
    fn blocks_match_their_sections() {
        let kinds: Vec<&str> = Section::ALL
            .into_iter()
            .map(|s| match route_default(s.label()).unwrap() {
                ContentBlock::Hero { .. } => "hero",
                ContentBlock::Text { .. } => "text",
                ContentBlock::Forecasts { .. } => "forecasts",
                ContentBlock::Correlation { .. } => "correlation",
                ContentBlock::Figures { .. } => "figures",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["hero", "text", "text", "text", "forecasts", "correlation", "figures"]
        );
    }

    #[test]
    fn spatial_figures_resolve_against_image_dir() {
        let config = DashboardConfig {
            image_dir: PathBuf::from("/srv/maps"),
            ..Default::default()
        };
        let Some(ContentBlock::Figures { figures, .. }) =
            route("Spatial and Clustering Analysis", &ObservationTable::peatland_site(), &config)
        else {
            panic!("expected figures");
        };
        let captions: Vec<_> = figures.iter().filter_map(|f| f.caption.as_deref()).collect();
        assert_eq!(
            captions,
            vec!["NDMI Difference Map", "NDWI Difference Map", "NDVI Difference Map"]
        );
        assert_eq!(figures[0].path, PathBuf::from("/srv/maps/ndmi_diff_map.png"));
    }

    #[test]
    fn time_series_block_uses_configured_horizon() {
        let config = DashboardConfig {
            forecast_horizon: 3,
            ..Default::default()
        };
        let Some(ContentBlock::Forecasts { forecasts, .. }) =
            route("Time Series Analysis", &ObservationTable::peatland_site(), &config)
        else {
            panic!("expected forecasts");
        };
        for f in forecasts {
            assert_eq!(f.outcome.unwrap().len(), 3);
        }
    }
}
