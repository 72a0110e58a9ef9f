mod actor_framework;
mod app_system;
mod book_actor;
mod cart_actor;
mod cart_store;
mod clients;
mod domain;
mod order_actor;
mod user_actor;

#[cfg(test)]
mod mock_framework;

use tracing::{error, info, Instrument};

use crate::app_system::{setup_tracing, StoreSystem};
use crate::book_actor::BookCreate;
use crate::cart_store::{CartStore, GuestCart};
use crate::domain::{Category, OrderStatus, PaymentMethod, Price, ShippingAddress};
use crate::user_actor::UserCreate;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting Book World storefront");

    let system = StoreSystem::new();

    // Seed the catalog.
    let dune = system
        .book_client
        .create_book(BookCreate {
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            description: "Sci-fi classic".into(),
            category: Category::Book,
            image: "dune.jpg".into(),
            price: Price::new(450.0, 350.0),
            quantity: 10,
            threshold: 3,
        })
        .await
        .map_err(|e| e.to_string())?;
    let pens = system
        .book_client
        .create_book(BookCreate {
            title: "Gel Pens (pack of 5)".into(),
            author: "Luxor".into(),
            description: "Blue gel pens".into(),
            category: Category::Stationery,
            image: "pens.jpg".into(),
            price: Price::new(99.0, 60.0),
            quantity: 50,
            threshold: 10,
        })
        .await
        .map_err(|e| e.to_string())?;
    info!("Catalog seeded");

    // An anonymous visitor fills a guest cart first.
    let guest_cart = GuestCart::new(system.book_client.clone());
    guest_cart
        .add_item("session_42", &pens, 3)
        .await
        .map_err(|e| e.to_string())?;

    // Then signs up, and the guest cart follows them.
    let user_id = system
        .user_client
        .create_user(UserCreate {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: Some("9999999999".into()),
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(user_id = %user_id, "User created");

    guest_cart
        .merge_into("session_42", &user_id, &system.cart_client)
        .await
        .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("cart_building");
    let cart = async {
        system
            .cart_client
            .add_item(&user_id, &dune, 2)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;
    info!(
        total = cart.total_amount,
        delivery = cart.delivery_charges,
        payable = cart.final_amount,
        "Cart ready"
    );

    let address = ShippingAddress {
        name: "Asha".into(),
        phone: "9999999999".into(),
        line1: "12 MG Road".into(),
        line2: None,
        city: "Pune".into(),
        state: "MH".into(),
        pincode: "411001".into(),
    };

    let span = tracing::info_span!("checkout");
    let order_result = async {
        info!("Placing order from cart");
        system
            .order_client
            .place_order(&user_id, address, PaymentMethod::Cod)
            .await
    }
    .instrument(span)
    .await;

    let order_id = match order_result {
        Ok(order_id) => {
            info!(order_id = %order_id, "Order placed successfully");
            order_id
        }
        Err(e) => {
            error!(error = %e, "Checkout failed");
            system.shutdown().await?;
            return Err(e.to_string());
        }
    };

    let remaining = system
        .book_client
        .check_stock(dune.clone())
        .await
        .map_err(|e| e.to_string())?;
    info!(book_id = %dune, remaining, "Stock after checkout");
    let dune_book = system
        .book_client
        .get_book(dune.clone())
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "book vanished from the catalog".to_string())?;
    info!(
        stock_status = ?dune_book.stock.status,
        discount = dune_book.price.discount_percent(),
        "Catalog view"
    );

    // Fulfilment, as the warehouse would drive it.
    for status in [OrderStatus::Confirmed, OrderStatus::Processing, OrderStatus::Packed] {
        system
            .order_client
            .update_status(&order_id, status, None, "admin")
            .await
            .map_err(|e| e.to_string())?;
    }
    system
        .order_client
        .set_tracking(&order_id, "BlueDart", "BD123456789")
        .await
        .map_err(|e| e.to_string())?;
    for status in [OrderStatus::Shipped, OrderStatus::OutForDelivery, OrderStatus::Delivered] {
        system
            .order_client
            .update_status(&order_id, status, None, "admin")
            .await
            .map_err(|e| e.to_string())?;
    }

    let order = system
        .order_client
        .get_order(&order_id, &user_id)
        .await
        .map_err(|e| e.to_string())?;
    info!(
        status = %order.status,
        transitions = order.status_history.len(),
        payment = ?order.payment.status,
        "Order delivered"
    );
    info!(
        courier = order.tracking.courier.as_deref().unwrap_or("-"),
        tracking = order.tracking.tracking_number.as_deref().unwrap_or("-"),
        city = %order.shipping_address.city,
        "Shipment details"
    );

    // A second order, abandoned before it ships; the stock goes back.
    system
        .cart_client
        .add_item(&user_id, &pens, 5)
        .await
        .map_err(|e| e.to_string())?;
    let address = ShippingAddress {
        name: "Asha".into(),
        phone: "9999999999".into(),
        line1: "12 MG Road".into(),
        line2: None,
        city: "Pune".into(),
        state: "MH".into(),
        pincode: "411001".into(),
    };
    let second = system
        .order_client
        .place_order(&user_id, address, PaymentMethod::Upi)
        .await
        .map_err(|e| e.to_string())?;
    let cancelled = system
        .order_client
        .cancel_order(&second, &user_id, "ordered by mistake")
        .await
        .map_err(|e| e.to_string())?;
    info!(order_id = %cancelled.id, status = %cancelled.status, "Second order cancelled");

    // A happy customer leaves a review.
    let rating = system
        .book_client
        .add_review(dune, user_id, 5, "Loved it".into())
        .await
        .map_err(|e| e.to_string())?;
    info!(average = rating.average, count = rating.count, "Review recorded");

    // The guest cart holds a catalog client; drop it so the actors can drain.
    drop(guest_cart);
    system.shutdown().await?;

    info!("Storefront demo completed");
    Ok(())
}
