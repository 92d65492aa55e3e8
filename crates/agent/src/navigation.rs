//! Navigation Link Generator
//!
//! Derives quick-link suggestions from a message, independent of pricing.
//! Rules are evaluated in priority order (order intent, pricing, portfolio,
//! then per-service pages); every matching rule contributes its link.

use std::sync::Arc;

use copy_assistant_config::{BrandSettings, CatalogStore};
use copy_assistant_core::{PhraseRule, ProjectRequirements, QuickLink};
use copy_assistant_text_processing::RequirementExtractor;

/// Page of a service category
pub fn service_url(category: &str) -> String {
    format!("/services/{}", category)
}

/// Service pages use the extractor's synonym table and the catalog's names,
/// so both stay in step with classification and catalog edits.
#[derive(Debug, Clone)]
pub struct Navigator {
    rules: Vec<(PhraseRule<()>, QuickLink)>,
    services: RequirementExtractor,
    store: Arc<CatalogStore>,
    brand: BrandSettings,
}

impl Navigator {
    pub fn new(store: Arc<CatalogStore>, brand: BrandSettings) -> Self {
        let rules = vec![
            (
                PhraseRule::new((), &["заказ", "оформить", "купить", "оплатить"]),
                QuickLink::new("Оформить заказ", "/order", "Заполните бриф, и мы начнём работу"),
            ),
            (
                PhraseRule::new(
                    (),
                    &["цен", "стоимост", "прайс", "сколько стоит", "рассчита", "тариф"],
                ),
                QuickLink::new("Цены", "/prices", "Прайс-лист на все услуги"),
            ),
            (
                PhraseRule::new((), &["портфолио", "примеры", "кейс"]),
                QuickLink::new("Портфолио", "/portfolio", "Примеры наших работ"),
            ),
        ];

        Self {
            rules,
            services: RequirementExtractor::new(),
            store,
            brand,
        }
    }

    /// Links for a message in the context of the collected requirements.
    ///
    /// With no matching rule, returns the default home/order/about set.
    pub fn links(&self, message: &str, context: &ProjectRequirements) -> Vec<QuickLink> {
        let lower = message.to_lowercase();
        let mut links: Vec<QuickLink> = Vec::new();

        for (rule, link) in &self.rules {
            if rule.matched_phrase(&lower).is_some() {
                push_unique(&mut links, link.clone());
            }
        }
        for category in self.services.service_categories(&lower) {
            if let Some(link) = self.service_link(category) {
                push_unique(&mut links, link);
            }
        }

        if links.is_empty() {
            return default_links();
        }

        if let Some(link) = context
            .service_type
            .as_deref()
            .and_then(|category| self.service_link(category))
        {
            push_unique(&mut links, link);
        }
        links
    }

    /// Link to a service category page, titled with the current catalog name
    pub fn service_link(&self, category: &str) -> Option<QuickLink> {
        let catalog = self.store.snapshot();
        catalog.service_by_category(category).map(|entry| {
            QuickLink::new(
                entry.name.clone(),
                service_url(&entry.category),
                "Подробнее об услуге",
            )
        })
    }

    /// Fixed contact-method links closing company-info answers
    pub fn closing_links(&self) -> Vec<QuickLink> {
        let telegram = self.brand.telegram.trim_start_matches('@');
        vec![
            QuickLink::new(
                "Telegram",
                format!("https://t.me/{}", telegram),
                "Написать в Telegram",
            ),
            QuickLink::new(
                "WhatsApp",
                format!("https://wa.me/{}", digits(&self.brand.whatsapp)),
                "Написать в WhatsApp",
            ),
            QuickLink::new(
                "Email",
                format!("mailto:{}", self.brand.email),
                "Написать на почту",
            ),
            QuickLink::new(
                "Телефон",
                format!("tel:+{}", digits(&self.brand.phone)),
                "Позвонить",
            ),
        ]
    }
}

fn default_links() -> Vec<QuickLink> {
    vec![
        QuickLink::new("Главная", "/", "Все услуги агентства"),
        QuickLink::new("Оформить заказ", "/order", "Заполните бриф, и мы начнём работу"),
        QuickLink::new("О нас", "/about", "Команда и подход к работе"),
    ]
}

fn push_unique(links: &mut Vec<QuickLink>, link: QuickLink) {
    if !links.iter().any(|l| l.url == link.url) {
        links.push(link);
    }
}

fn digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigator() -> Navigator {
        Navigator::new(
            Arc::new(CatalogStore::builtin().unwrap()),
            BrandSettings::default(),
        )
    }

    fn urls(links: &[QuickLink]) -> Vec<&str> {
        links.iter().map(|l| l.url.as_str()).collect()
    }

    #[test]
    fn test_default_links_when_nothing_matches() {
        let links = navigator().links("Добрый день", &ProjectRequirements::default());
        assert_eq!(urls(&links), vec!["/", "/order", "/about"]);
    }

    #[test]
    fn test_rules_in_priority_order() {
        let links = navigator().links(
            "Хочу заказать лендинг, покажите цены и примеры",
            &ProjectRequirements::default(),
        );
        assert_eq!(
            urls(&links),
            vec!["/order", "/prices", "/portfolio", "/services/landing"]
        );
    }

    #[test]
    fn test_context_service_link_appended_once() {
        let context = ProjectRequirements {
            service_type: Some("seo".to_string()),
            ..Default::default()
        };
        let links = navigator().links("Сколько стоит?", &context);
        assert_eq!(urls(&links), vec!["/prices", "/services/seo"]);

        let links = navigator().links("Статьи для блога", &context);
        assert_eq!(urls(&links), vec!["/services/seo"]);
    }

    #[test]
    fn test_closing_links_fixed() {
        let nav = navigator();
        let links = nav.closing_links();
        assert_eq!(links.len(), 4);
        assert_eq!(links[0].url, "https://t.me/slovo_copy");
        assert_eq!(links[2].url, "mailto:hello@slovo-copy.ru");
        assert_eq!(links[3].url, "tel:+78005553535");
        assert_eq!(nav.closing_links(), links);
    }

    #[test]
    fn test_service_links_follow_extractor_synonyms() {
        let links = navigator().links(
            "Нужно 3 поста в Telegram-канал",
            &ProjectRequirements::default(),
        );
        assert_eq!(urls(&links), vec!["/services/social"]);
        assert_eq!(links[0].title, "Посты для соцсетей");
    }

    #[test]
    fn test_service_titles_follow_catalog_edits() {
        let store = Arc::new(CatalogStore::builtin().unwrap());
        let nav = Navigator::new(Arc::clone(&store), BrandSettings::default());

        let mut catalog = (*store.snapshot()).clone();
        let landing = catalog
            .services
            .iter_mut()
            .find(|s| s.category == "landing")
            .unwrap();
        landing.name = "Лендинги под ключ".to_string();
        store.replace(catalog).unwrap();

        assert_eq!(nav.service_link("landing").unwrap().title, "Лендинги под ключ");
        assert!(nav.service_link("naming").is_none());
    }
}
