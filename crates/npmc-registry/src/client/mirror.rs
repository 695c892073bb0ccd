//! Well-known registry mirrors

use std::fmt;
use std::str::FromStr;

use npmc_core::error::NpmcError;

/// A named npm-compatible registry. Each one is only a different base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mirror {
    Npm,
    Yarn,
    Cnpm,
    TaoBao,
    NpmjsCom,
    Tencent,
    NpmMirror,
    HuaWeiCloud,
}

impl Mirror {
    /// Every known mirror, official registry first
    pub const ALL: [Mirror; 8] = [
        Mirror::Npm,
        Mirror::Yarn,
        Mirror::Cnpm,
        Mirror::TaoBao,
        Mirror::NpmjsCom,
        Mirror::Tencent,
        Mirror::NpmMirror,
        Mirror::HuaWeiCloud,
    ];

    /// Base URL of this mirror
    pub fn url(self) -> &'static str {
        match self {
            Mirror::Npm => "https://registry.npmjs.org",
            Mirror::Yarn => "https://registry.yarnpkg.com",
            Mirror::Cnpm => "http://r.cnpmjs.org",
            Mirror::TaoBao => "https://registry.npm.taobao.org",
            Mirror::NpmjsCom => "https://skimdb.npmjs.com",
            Mirror::Tencent => "http://mirrors.cloud.tencent.com/npm",
            Mirror::NpmMirror => "https://registry.npmmirror.com",
            Mirror::HuaWeiCloud => "https://mirrors.huaweicloud.com/repository/npm",
        }
    }

    /// Short name used on the command line and in config files
    pub fn name(self) -> &'static str {
        match self {
            Mirror::Npm => "npm",
            Mirror::Yarn => "yarn",
            Mirror::Cnpm => "cnpm",
            Mirror::TaoBao => "taobao",
            Mirror::NpmjsCom => "npmjs-com",
            Mirror::Tencent => "tencent",
            Mirror::NpmMirror => "npmmirror",
            Mirror::HuaWeiCloud => "huaweicloud",
        }
    }
}

impl fmt::Display for Mirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mirror {
    type Err = NpmcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mirror::ALL
            .into_iter()
            .find(|mirror| mirror.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| NpmcError::ConfigValidation {
                field: "mirror".to_string(),
                reason: format!(
                    "unknown mirror '{}', expected one of: {}",
                    s,
                    Mirror::ALL.map(Mirror::name).join(", ")
                ),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for mirror in Mirror::ALL {
            assert_eq!(mirror.name().parse::<Mirror>().unwrap(), mirror);
        }
        assert_eq!("TaoBao".parse::<Mirror>().unwrap(), Mirror::TaoBao);
    }

    #[test]
    fn test_unknown_mirror() {
        let err = "gitee".parse::<Mirror>().unwrap_err();
        assert!(err.to_string().contains("unknown mirror 'gitee'"));
    }

    #[test]
    fn test_urls_have_no_trailing_slash() {
        for mirror in Mirror::ALL {
            assert!(!mirror.url().ends_with('/'), "{}", mirror);
        }
    }
}
