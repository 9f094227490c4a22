//! Line-item predicates used by the product and upsell reducers.

use orderdash_core::NormalizedLineItem;

fn name_or_title_contains(item: &NormalizedLineItem, needle: &str) -> bool {
    [item.name.as_deref(), item.title.as_deref()]
        .into_iter()
        .flatten()
        .any(|text| text.to_lowercase().contains(needle))
}

/// `false` for shipping placeholders: an exact SKU match against
/// `shipping_skus`, or "shipping" anywhere in the name or title.
#[must_use]
pub fn is_real_product(item: &NormalizedLineItem, shipping_skus: &[String]) -> bool {
    let sku_is_placeholder = item
        .sku
        .as_deref()
        .is_some_and(|sku| shipping_skus.iter().any(|s| s == sku));
    !sku_is_placeholder && !name_or_title_contains(item, "shipping")
}

/// An upsell carries a positive `upsell_id`, a non-empty `upsell_type`, or
/// "upsell" in its name or title.
#[must_use]
pub fn is_upsell(item: &NormalizedLineItem) -> bool {
    item.upsell_id.is_some_and(|id| id > 0)
        || item.upsell_type.as_deref().is_some_and(|t| !t.is_empty())
        || name_or_title_contains(item, "upsell")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skus() -> Vec<String> {
        vec!["SHIPPING".to_owned()]
    }

    fn named(name: &str) -> NormalizedLineItem {
        NormalizedLineItem {
            name: Some(name.to_owned()),
            ..NormalizedLineItem::default()
        }
    }

    #[test]
    fn shipping_names_are_not_products() {
        assert!(!is_real_product(&named("Priority Shipping"), &skus()));
        assert!(!is_real_product(&named("FREE SHIPPING"), &skus()));
        let titled = NormalizedLineItem {
            name: Some("Extra".to_owned()),
            title: Some("Shipping protection".to_owned()),
            ..NormalizedLineItem::default()
        };
        assert!(!is_real_product(&titled, &skus()));
    }

    #[test]
    fn placeholder_sku_is_excluded_by_exact_match_only() {
        let placeholder = NormalizedLineItem {
            name: Some("Handling".to_owned()),
            sku: Some("SHIPPING".to_owned()),
            ..NormalizedLineItem::default()
        };
        assert!(!is_real_product(&placeholder, &skus()));

        let lookalike = NormalizedLineItem {
            name: Some("Handling".to_owned()),
            sku: Some("shipping".to_owned()),
            ..NormalizedLineItem::default()
        };
        assert!(is_real_product(&lookalike, &skus()));
    }

    #[test]
    fn regular_items_and_nameless_items_are_products() {
        assert!(is_real_product(&named("Widget"), &skus()));
        assert!(is_real_product(&NormalizedLineItem::default(), &skus()));
    }

    #[test]
    fn upsell_markers() {
        let by_id = NormalizedLineItem {
            upsell_id: Some(4),
            ..NormalizedLineItem::default()
        };
        let by_type = NormalizedLineItem {
            upsell_type: Some("post_purchase".to_owned()),
            ..NormalizedLineItem::default()
        };
        assert!(is_upsell(&by_id));
        assert!(is_upsell(&by_type));
        assert!(is_upsell(&named("Bonus UPSELL pack")));
    }

    #[test]
    fn zero_id_and_empty_type_are_not_upsells() {
        let item = NormalizedLineItem {
            name: Some("Widget".to_owned()),
            upsell_id: Some(0),
            upsell_type: Some(String::new()),
            ..NormalizedLineItem::default()
        };
        assert!(!is_upsell(&item));
    }
}
