use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::descriptor::DialectDescriptor;
use super::select::build_select;
use super::sql::{
    athena, db2, generic, hive, impala, mysql, native, oracle, postgres, redshift, sqlserver,
    sybase, teradata,
};
use super::traits::SqlGenerator;
use crate::ast::Select;
use crate::capabilities::{CapabilitySet, capabilities_for};
use crate::config::DialectProperties;
use crate::error::{PushdownError, PushdownResult};
use crate::types::base::map_base;
use crate::types::{CanonicalType, RemoteType};

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dialect {
    Athena,
    Db2,
    Generic,
    Hive,
    Impala,
    MySql,
    Native,
    Oracle,
    PostgreSql,
    Redshift,
    SqlServer,
    Sybase,
    Teradata,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::Native
    }
}

impl Dialect {
    /// Every dialect, in declaration order.
    pub const ALL: [Dialect; 13] = [
        Dialect::Athena,
        Dialect::Db2,
        Dialect::Generic,
        Dialect::Hive,
        Dialect::Impala,
        Dialect::MySql,
        Dialect::Native,
        Dialect::Oracle,
        Dialect::PostgreSql,
        Dialect::Redshift,
        Dialect::SqlServer,
        Dialect::Sybase,
        Dialect::Teradata,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Athena => "ATHENA",
            Dialect::Db2 => "DB2",
            Dialect::Generic => "GENERIC",
            Dialect::Hive => "HIVE",
            Dialect::Impala => "IMPALA",
            Dialect::MySql => "MYSQL",
            Dialect::Native => "NATIVE",
            Dialect::Oracle => "ORACLE",
            Dialect::PostgreSql => "POSTGRESQL",
            Dialect::Redshift => "REDSHIFT",
            Dialect::SqlServer => "SQLSERVER",
            Dialect::Sybase => "SYBASE",
            Dialect::Teradata => "TERADATA",
        }
    }

    /// The static capability table of this dialect.
    pub(crate) fn declared_capabilities(self) -> CapabilitySet {
        match self {
            Dialect::Athena => athena::capabilities(),
            Dialect::Db2 => db2::capabilities(),
            Dialect::Generic => generic::capabilities(),
            Dialect::Hive => hive::capabilities(),
            Dialect::Impala => impala::capabilities(),
            Dialect::MySql => mysql::capabilities(),
            Dialect::Native => native::capabilities(),
            Dialect::Oracle => oracle::capabilities(),
            Dialect::PostgreSql => postgres::capabilities(),
            Dialect::Redshift => redshift::capabilities(),
            Dialect::SqlServer => sqlserver::capabilities(),
            Dialect::Sybase => sybase::capabilities(),
            Dialect::Teradata => teradata::capabilities(),
        }
    }

    pub fn generator(self, properties: &DialectProperties) -> PushdownResult<Box<dyn SqlGenerator>> {
        if self != Dialect::Oracle && properties.cast_number_to_decimal.is_some() {
            tracing::warn!("Property cast_number_to_decimal is ignored by the {} dialect", self);
        }
        if self != Dialect::Generic && properties.schema_notes.is_some() {
            tracing::warn!("Schema notes are ignored by the {} dialect", self);
        }
        Ok(match self {
            Dialect::Athena => Box::new(athena::AthenaGenerator),
            Dialect::Db2 => Box::new(db2::Db2Generator),
            Dialect::Generic => Box::new(generic::GenericGenerator::new(properties)?),
            Dialect::Hive => Box::new(hive::HiveGenerator),
            Dialect::Impala => Box::new(impala::ImpalaGenerator),
            Dialect::MySql => Box::new(mysql::MysqlGenerator),
            Dialect::Native => Box::new(native::NativeGenerator),
            Dialect::Oracle => Box::new(oracle::OracleGenerator::new(properties)?),
            Dialect::PostgreSql => Box::new(postgres::PostgresGenerator),
            Dialect::Redshift => Box::new(redshift::RedshiftGenerator),
            Dialect::SqlServer => Box::new(sqlserver::SqlServerGenerator),
            Dialect::Sybase => Box::new(sybase::SybaseGenerator),
            Dialect::Teradata => Box::new(teradata::TeradataGenerator),
        })
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = PushdownError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| PushdownError::UnknownDialect(s.to_string()))
    }
}

/// A constructed dialect: immutable, shareable across threads.
pub struct SqlDialect {
    dialect: Dialect,
    generator: Box<dyn SqlGenerator>,
}

impl fmt::Debug for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlDialect")
            .field("dialect", &self.dialect)
            .field("descriptor", self.generator.descriptor())
            .finish()
    }
}

impl SqlDialect {
    /// Build a dialect. Configuration problems surface here, never while
    /// generating.
    pub fn new(dialect: Dialect, properties: &DialectProperties) -> PushdownResult<Self> {
        let generator = dialect.generator(properties)?;
        tracing::debug!("Constructed {} dialect", dialect);
        Ok(Self { dialect, generator })
    }

    /// Build a dialect with default properties.
    pub fn of(dialect: Dialect) -> PushdownResult<Self> {
        Self::new(dialect, &DialectProperties::default())
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn descriptor(&self) -> &DialectDescriptor {
        self.generator.descriptor()
    }

    pub fn generator(&self) -> &dyn SqlGenerator {
        self.generator.as_ref()
    }

    pub fn capabilities(&self) -> &'static CapabilitySet {
        capabilities_for(self.dialect)
    }

    /// Map a remote column type. Unclaimed types are unsupported, not errors.
    pub fn map_type(&self, remote: &RemoteType) -> CanonicalType {
        let mapped = self
            .generator
            .map_type(remote)
            .unwrap_or_else(|| map_base(remote, self.descriptor().numeric_fallback()));
        if !mapped.is_supported() {
            tracing::debug!(
                "Unsupported {} type '{}' (code {}, size {}, scale {})",
                self.dialect,
                remote.type_name,
                remote.type_code,
                remote.size,
                remote.scale
            );
        }
        mapped
    }

    /// Generate SQL text for `select`.
    pub fn generate(&self, select: &Select) -> PushdownResult<String> {
        let sql = build_select(select, self.generator())?;
        tracing::debug!("Generated {} SQL: {}", self.dialect, sql);
        Ok(sql)
    }
}
