use crate::api::response::{
    AddressResponse, AdminOrderResponse, CartLineResponse, CartResponse, OrderLineResponse,
    OrderResponse, OrderWithItemsResponse, PaymentInstructionsResponse, PlacedOrderResponse,
    ProductResponse,
};
use crate::data::models::address::Address;
use crate::data::models::order::Order;
use crate::data::models::order_detail::OrderDetail;
use crate::data::models::product::Product;
use crate::data::models::user::User;
use crate::services::cart_service::{CartState, CartStateLine};
use crate::services::order_service::{PaymentInstructions, PlacedOrder};

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            sku: product.sku,
            image_path: product.image_path,
        }
    }
}

impl From<CartStateLine> for CartLineResponse {
    fn from(line: CartStateLine) -> Self {
        CartLineResponse {
            product_id: line.product_id,
            name: line.name,
            price: line.price,
            quantity: line.quantity,
            line_total: line.line_total,
        }
    }
}

impl From<CartState> for CartResponse {
    fn from(state: CartState) -> Self {
        CartResponse {
            subtotal: state.subtotal,
            lines: state.lines.into_iter().map(CartLineResponse::from).collect(),
        }
    }
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        AddressResponse {
            id: address.id,
            full_name: address.full_name,
            address_line1: address.address_line1,
            city: address.city,
            state: address.state,
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let grand_total = order.grand_total();
        OrderResponse {
            id: order.id,
            order_date: order.order_date.format("%Y-%m-%d %H:%M:%S").to_string(),
            total_amount: order.total_amount,
            delivery_fee: order.delivery_fee,
            grand_total,
            status: order.status,
            payment_method: order.payment_method,
            delivery_option: order.delivery_option,
        }
    }
}

impl From<(Order, User)> for AdminOrderResponse {
    fn from((order, customer): (Order, User)) -> Self {
        let grand_total = order.grand_total();
        AdminOrderResponse {
            id: order.id,
            customer_email: customer.email,
            order_date: order.order_date.format("%Y-%m-%d %H:%M:%S").to_string(),
            total_amount: order.total_amount,
            delivery_fee: order.delivery_fee,
            grand_total,
            status: order.status,
            payment_method: order.payment_method,
        }
    }
}

impl From<PaymentInstructions> for PaymentInstructionsResponse {
    fn from(instructions: PaymentInstructions) -> Self {
        PaymentInstructionsResponse {
            bank_name: instructions.bank_name,
            account_name: instructions.account_name,
            account_number: instructions.account_number,
            currency: instructions.currency,
            reference: instructions.reference,
            note: instructions.note,
            deadline: instructions.deadline,
        }
    }
}

impl From<PlacedOrder> for PlacedOrderResponse {
    fn from(placed: PlacedOrder) -> Self {
        PlacedOrderResponse {
            order_id: placed.order_id,
            total_amount: placed.total_amount,
            delivery_fee: placed.delivery_fee,
            grand_total: placed.grand_total,
            payment: PaymentInstructionsResponse::from(placed.instructions),
        }
    }
}

impl From<(OrderDetail, Product)> for OrderLineResponse {
    fn from((detail, product): (OrderDetail, Product)) -> Self {
        let line_total = detail.line_total();
        OrderLineResponse {
            product_id: detail.product_id,
            name: product.name,
            quantity: detail.quantity,
            price: detail.price,
            line_total,
        }
    }
}

impl From<(Order, Vec<(OrderDetail, Product)>)> for OrderWithItemsResponse {
    fn from((order, details): (Order, Vec<(OrderDetail, Product)>)) -> Self {
        OrderWithItemsResponse {
            order: OrderResponse::from(order),
            items: details.into_iter().map(OrderLineResponse::from).collect(),
        }
    }
}
