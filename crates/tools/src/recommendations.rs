//! Advisory recommendations
//!
//! Purely advisory text keyed off client segment and service category.
//! Not part of any price computation.

use copy_assistant_config::ServiceCatalog;
use copy_assistant_core::ClientSegment;

/// Recommendations for a segment and an optional service category.
///
/// Order: segment advice, category advice, then one matching portfolio case.
pub fn recommendations(
    segment: ClientSegment,
    category: Option<&str>,
    catalog: &ServiceCatalog,
) -> Vec<String> {
    let mut items = Vec::new();

    let segment_advice = match segment {
        ClientSegment::New => Some("Начните с одного пробного текста: так проще оценить стиль и подход."),
        ClientSegment::Business => Some("Закажите контент-план на квартал: единый тон и предсказуемый бюджет."),
        ClientSegment::Returning => Some("Сохраним ваш прошлый бриф и стиль, чтобы не тратить время на согласования."),
        ClientSegment::Unknown => None,
    };
    items.extend(segment_advice.map(str::to_string));

    let Some(category) = category else {
        return items;
    };

    let category_advice = match category {
        "seo" => Some("Добавьте к статьям сбор семантического ядра: тексты будут точнее попадать в запросы."),
        "landing" => Some("Попросите два варианта оффера для A/B-теста первого экрана."),
        "email" => Some("Стройте рассылку цепочкой из 3–5 писем, а не разовыми отправками."),
        "social" => Some("Контент-план на месяц вперёд помогает держать регулярность публикаций."),
        "product" => Some("Единый шаблон описаний ускоряет загрузку карточек на маркетплейс."),
        "commercial" => Some("Персонализируйте КП под каждого крупного клиента: это повышает отклик."),
        _ => None,
    };
    items.extend(category_advice.map(str::to_string));

    if let Some(case) = catalog.portfolio_for_category(category).first() {
        items.push(format!("Посмотрите наш кейс «{}»: {}", case.title, case.result));
    }

    items
}
