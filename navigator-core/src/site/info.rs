//! Static informational content: about, contact and data-source pages

use serde::Serialize;

/// Where a data source comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Official,
    Community,
    Research,
}

impl SourceKind {
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Official => "Official",
            SourceKind::Community => "Community",
            SourceKind::Research => "Research",
        }
    }
}

/// How far a data source can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reliability {
    High,
    Medium,
    Low,
}

impl Reliability {
    pub fn label(self) -> &'static str {
        match self {
            Reliability::High => "High reliability",
            Reliability::Medium => "Medium reliability",
            Reliability::Low => "Low reliability",
        }
    }
}

/// One row of the data-source table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataSource {
    pub name: &'static str,
    pub url: Option<&'static str>,
    pub kind: SourceKind,
    pub reliability: Reliability,
    pub description: &'static str,
}

pub const DATA_SOURCES: &[DataSource] = &[
    DataSource {
        name: "Official Anthropic MCP Server Repository",
        url: Some("https://github.com/modelcontextprotocol/servers"),
        kind: SourceKind::Official,
        reliability: Reliability::High,
        description: "Reference server implementations and examples maintained by Anthropic",
    },
    DataSource {
        name: "Official MCP Documentation and Examples",
        url: Some("https://modelcontextprotocol.io/examples"),
        kind: SourceKind::Official,
        reliability: Reliability::High,
        description: "Server examples and best practices from the official documentation",
    },
    DataSource {
        name: "Community Curated Lists",
        url: None,
        kind: SourceKind::Community,
        reliability: Reliability::Medium,
        description: "Server lists and recommendations curated by the developer community",
    },
    DataSource {
        name: "GitHub Repository Analysis",
        url: None,
        kind: SourceKind::Research,
        reliability: Reliability::Medium,
        description: "Data collected by analysing MCP-related projects on GitHub",
    },
];

/// A titled block of prose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Section {
    pub heading: &'static str,
    pub body: &'static str,
}

pub const ABOUT_SECTIONS: &[Section] = &[
    Section {
        heading: "About MCP Navigator",
        body: "MCP Navigator is a resource for discovering, exploring and adopting \
               Model Context Protocol (MCP) servers in your projects.",
    },
    Section {
        heading: "What are MCPs?",
        body: "MCP servers let AI models interact with external tools and services. \
               They bridge models and applications, databases, APIs and other services.",
    },
    Section {
        heading: "Our Mission",
        body: "A central hub for the MCP ecosystem, so developers can find, compare and \
               integrate MCP servers in their applications.",
    },
    Section {
        heading: "Contribute",
        body: "MCP Navigator is an open community resource. If you have built an MCP server \
               or found one that is not listed, contributions are welcome via the official \
               MCP repository: https://github.com/modelcontextprotocol/servers",
    },
];

pub const CONTACT_EMAIL: &str = "jason660519@gmail.com";
pub const CONTACT_GITHUB: &str = "https://github.com/jason660519/MCP-Navigator";

pub const CONTACT_SECTIONS: &[Section] = &[
    Section {
        heading: "Get in Touch",
        body: "Questions about MCP Navigator, or want to contribute? Reach out by email or on GitHub.",
    },
    Section {
        heading: "About MCP Navigator",
        body: "A community-driven, open-source directory of Model Context Protocol servers.",
    },
];

pub const DATA_SOURCES_SECTIONS: &[Section] = &[Section {
    heading: "Data Collection Methods",
    body: "Entries are collected from official repositories, documentation, community \
           lists and repository analysis, then checked for required fields and link format.",
}];
