//! Printing command results to stdout.

#![allow(clippy::print_stdout)]

use qkart_core::{CartLineItem, Product, cart_total, total_quantity};
use qkart_storefront::Notice;

pub fn notice(notice: &Notice) {
    println!("{notice}");
}

pub fn notices(notices: &[Notice]) {
    for n in notices {
        notice(n);
    }
}

pub fn message(text: &str) {
    println!("{text}");
}

pub fn products(products: &[Product]) {
    if products.is_empty() {
        println!("No products found");
        return;
    }

    for product in products {
        println!(
            "{:<18} {:<32} {:<14} ${:>8}  {}",
            product.id.as_str(),
            product.name,
            product.category,
            product.cost.to_string(),
            product.rating
        );
    }
}

pub fn cart(items: &[CartLineItem]) {
    if items.is_empty() {
        println!("Cart is empty");
        return;
    }

    for item in items {
        println!(
            "{:<18} {:<32} {:>3} x ${:>8} = ${:>9}",
            item.product_id.as_str(),
            item.name,
            item.quantity,
            item.cost.to_string(),
            item.line_total().to_string()
        );
    }
    println!(
        "{} item(s), order total ${}",
        total_quantity(items),
        cart_total(items)
    );
}
