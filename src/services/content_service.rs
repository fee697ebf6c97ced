//! Editable site copy stored as JSON values under a fixed set of keys.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde_json::{json, Value};
use tracing::info;

use crate::directory::Directory;
use crate::errors::{DirectoryError, Result};

pub const CONTENT_KEYS: [&str; 7] = [
    "homepage_feature_tags",
    "homepage_stats",
    "homepage_steps",
    "homepage_bonuses",
    "city_showcase",
    "floating_benefits",
    "site_settings",
];

static DEFAULTS: Lazy<BTreeMap<&'static str, Value>> = Lazy::new(|| {
    BTreeMap::from([
        (
            "homepage_feature_tags",
            json!([
                {"icon": "GraduationCap", "label": "升学强校", "desc": "高升学率，名校直通", "href": "/zh-CN/schools?tag=升学强校"},
                {"icon": "Palette", "label": "美术升学", "desc": "美大 · 专门学校对策", "href": "/zh-CN/schools?tag=美术升学"},
                {"icon": "Briefcase", "label": "就职辅导", "desc": "就职签证变更支持", "href": "/zh-CN/schools?tag=就职辅导"},
                {"icon": "UserCheck", "label": "大龄OK", "desc": "30岁以上也可入学", "href": "/zh-CN/schools?tag=大龄OK"},
                {"icon": "Globe", "label": "零基础OK", "desc": "日语零基础可入学", "href": "/zh-CN/schools?tag=零基础OK"},
                {"icon": "Award", "label": "奖学金制度", "desc": "学费减免 · 奖学金可申请", "href": "/zh-CN/schools?tag=奖学金制度"}
            ]),
        ),
        (
            "homepage_stats",
            json!([
                {"label": "合作学校", "value": "12+", "suffix": "所"},
                {"label": "覆盖城市", "value": "6", "suffix": "座"},
                {"label": "佣金透明度", "value": "100", "suffix": "%"},
                {"label": "咨询费用", "value": "0", "suffix": "元"}
            ]),
        ),
        (
            "homepage_steps",
            json!([
                {"step": "01", "icon": "Search", "title": "选学校", "desc": "按地区、预算和特色筛选出 3–5 所候选学校。"},
                {"step": "02", "icon": "GitCompareArrows", "title": "加对比", "desc": "用对比工具并排查看学费、通过率、生活成本。"},
                {"step": "03", "icon": "MessageSquareText", "title": "提交咨询", "desc": "一次填写表单，平台帮你和学校沟通细节。"},
                {"step": "04", "icon": "FileCheck2", "title": "确认方案", "desc": "收到包含总费用明细的留学方案，再做决定。"},
                {"step": "05", "icon": "PlaneTakeoff", "title": "办理入学", "desc": "办签证和住宿，锁定赠送课程与行前服务。"}
            ]),
        ),
        (
            "homepage_bonuses",
            json!([
                {"icon": "BookOpen", "title": "行前日语体验课", "desc": "提供数次线上日语小班或 1v1 体验课，帮助你在出发前熟悉真实课堂节奏。", "href": "/zh-CN/services/japanese-lessons"},
                {"icon": "FileSearch", "title": "签证与材料预检查", "desc": "顾问协助检查在留资格材料，减少因细节错误被补件或延误的风险。", "href": "/zh-CN/services/visa-support"},
                {"icon": "MapPinned", "title": "日本生活落地指南", "desc": "提供开银行卡、手机卡、住民登记等一步步操作清单，让第一周不踩坑。", "href": "/zh-CN/services/life-guide"},
                {"icon": "Gift", "title": "城市专属福利", "desc": "不同城市可能还会有额外福利，详情可在咨询时确认。", "href": "/zh-CN/services/city-benefits"}
            ]),
        ),
        (
            "city_showcase",
            json!([
                {"name": "东京", "nameJa": "東京", "prefecture": "东京都", "schools": 5},
                {"name": "大阪", "nameJa": "大阪", "prefecture": "大阪府", "schools": 3},
                {"name": "冲绳", "nameJa": "沖縄", "prefecture": "冲绳县", "schools": 1},
                {"name": "名古屋", "nameJa": "名古屋", "prefecture": "爱知县", "schools": 2},
                {"name": "福冈", "nameJa": "福岡", "prefecture": "福冈县", "schools": 1}
            ]),
        ),
        (
            "floating_benefits",
            json!([
                {"icon": "BookOpen", "title": "行前日语体验课", "desc": "线上小班或1v1体验课，出发前熟悉课堂节奏"},
                {"icon": "FileSearch", "title": "签证材料预检查", "desc": "顾问协助检查在留资格材料，减少补件风险"},
                {"icon": "MapPinned", "title": "日本生活落地指南", "desc": "银行卡、手机卡、住民登记一步步操作清单"},
                {"icon": "Sparkles", "title": "城市专属福利", "desc": "交通卡充值、机票优惠等额外福利"}
            ]),
        ),
        (
            "site_settings",
            json!({
                "siteName": "日本留学Lab",
                "phoneJapan": "03-XXXX-XXXX",
                "phoneChina": "400-XXX-XXXX",
                "address": "東京都新宿区...",
                "businessHours": "周一至周五 9:00-18:00 (日本时间)"
            }),
        ),
    ])
});

pub struct ContentService;

impl ContentService {
    pub fn is_known_key(key: &str) -> bool {
        CONTENT_KEYS.contains(&key)
    }

    fn ensure_known(key: &str) -> Result<()> {
        if Self::is_known_key(key) {
            Ok(())
        } else {
            Err(DirectoryError::InvalidContentKey(key.to_string()))
        }
    }

    pub fn default_for(key: &str) -> Option<&'static Value> {
        DEFAULTS.get(key)
    }

    /// Stored value for `key`, or the built-in default when nothing is stored.
    pub fn get(directory: &Directory, key: &str) -> Result<Value> {
        Self::ensure_known(key)?;
        Ok(directory
            .site_content
            .get(key)
            .or_else(|| Self::default_for(key))
            .cloned()
            .unwrap_or(Value::Null))
    }

    pub fn set(directory: &mut Directory, key: &str, value: Value) -> Result<()> {
        Self::ensure_known(key)?;
        directory.site_content.insert(key.to_string(), value);
        directory.touch();
        info!(key, "site content updated");
        Ok(())
    }

    /// Drops the stored value so the default applies again.
    pub fn reset(directory: &mut Directory, key: &str) -> Result<()> {
        Self::ensure_known(key)?;
        if directory.site_content.remove(key).is_some() {
            directory.touch();
        }
        Ok(())
    }

    /// Every key with its effective value.
    pub fn get_all(directory: &Directory) -> BTreeMap<String, Value> {
        CONTENT_KEYS
            .iter()
            .map(|key| {
                let value = directory
                    .site_content
                    .get(*key)
                    .or_else(|| Self::default_for(key))
                    .cloned()
                    .unwrap_or(Value::Null);
                (key.to_string(), value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_a_default() {
        for key in CONTENT_KEYS {
            assert!(ContentService::default_for(key).is_some(), "{key}");
        }
    }

    #[test]
    fn stored_value_overrides_default_until_reset() {
        let mut directory = Directory::new("test");
        let settings = ContentService::get(&directory, "site_settings").unwrap();
        assert_eq!(settings["siteName"], "日本留学Lab");

        ContentService::set(&mut directory, "site_settings", json!({"siteName": "留学Lab"})).unwrap();
        assert_eq!(
            ContentService::get(&directory, "site_settings").unwrap()["siteName"],
            "留学Lab"
        );
        ContentService::reset(&mut directory, "site_settings").unwrap();
        assert_eq!(
            ContentService::get_all(&directory)["site_settings"]["siteName"],
            "日本留学Lab"
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut directory = Directory::new("test");
        assert!(matches!(
            ContentService::set(&mut directory, "hero_banner", Value::Null),
            Err(DirectoryError::InvalidContentKey(key)) if key == "hero_banner"
        ));
        assert!(ContentService::get(&directory, "hero_banner").is_err());
    }
}
