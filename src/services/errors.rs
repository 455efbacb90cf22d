use diesel::result;

#[derive(Debug, PartialEq)]
pub enum CartServiceError {
    ProductNotFound,
    NotInCart,
    InvalidQuantityChange,
    Storage,
}

impl std::error::Error for CartServiceError {}

impl std::fmt::Display for CartServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartServiceError::ProductNotFound => write!(f, "Product not found."),
            CartServiceError::NotInCart => write!(f, "Item not in cart."),
            CartServiceError::InvalidQuantityChange => {
                write!(f, "Invalid product or quantity change.")
            }
            CartServiceError::Storage => write!(f, "Database error"),
        }
    }
}

#[derive(Debug)]
pub enum OrderServiceError {
    EmptyCart,
    AddressNotFound,
    MissingAddressField,
    UnknownDeliveryOption(String),
    UnsupportedPaymentMethod(String),
    PaymentNotConfigured,
    OrderNotFound,
    /// Illegal state transition or ownership mismatch; the message is shown
    /// to the caller as-is.
    PreconditionFailed(String),
    /// The order-placement transaction failed and was rolled back.
    CheckoutFailed(result::Error),
    Storage,
}

impl std::error::Error for OrderServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OrderServiceError::CheckoutFailed(cause) => Some(cause),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderServiceError::EmptyCart => write!(f, "Your cart is empty."),
            OrderServiceError::AddressNotFound => write!(f, "Invalid address selected."),
            OrderServiceError::MissingAddressField => {
                write!(f, "All address fields are required.")
            }
            OrderServiceError::UnknownDeliveryOption(label) => {
                write!(f, "Unknown delivery option: {label}")
            }
            OrderServiceError::UnsupportedPaymentMethod(method) => {
                write!(f, "Unsupported payment method: {method}")
            }
            OrderServiceError::PaymentNotConfigured => {
                write!(f, "Payment configuration is incomplete. Please contact support.")
            }
            OrderServiceError::OrderNotFound => write!(f, "Order not found."),
            OrderServiceError::PreconditionFailed(message) => write!(f, "{message}"),
            OrderServiceError::CheckoutFailed(cause) => {
                write!(f, "Error processing your order: {cause}")
            }
            OrderServiceError::Storage => write!(f, "Database error"),
        }
    }
}

#[derive(Debug)]
pub enum AdminServiceError {
    /// Approval precondition violated; surfaced to the admin verbatim.
    PreconditionFailed(String),
    Storage,
}

impl std::error::Error for AdminServiceError {}

impl std::fmt::Display for AdminServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminServiceError::PreconditionFailed(message) => write!(f, "{message}"),
            AdminServiceError::Storage => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ProductServiceError {
    ProductNotFound,
    MissingName,
    InvalidPrice,
    Storage,
}

impl std::error::Error for ProductServiceError {}

impl std::fmt::Display for ProductServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductServiceError::ProductNotFound => write!(f, "Product not found."),
            ProductServiceError::MissingName => write!(f, "Product name is required."),
            ProductServiceError::InvalidPrice => {
                write!(f, "Product price must be greater than zero.")
            }
            ProductServiceError::Storage => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum AddressServiceError {
    MissingField,
    Storage,
}

impl std::error::Error for AddressServiceError {}

impl std::fmt::Display for AddressServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressServiceError::MissingField => write!(f, "All address fields are required."),
            AddressServiceError::Storage => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum AuthServiceError {
    MissingField,
    PasswordMismatch,
    EmailTaken,
    InvalidUsername,
    InvalidCredentials,
    Internal,
    Storage,
}

impl std::error::Error for AuthServiceError {}

impl std::fmt::Display for AuthServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthServiceError::MissingField => write!(f, "All fields are required."),
            AuthServiceError::PasswordMismatch => write!(f, "Passwords do not match."),
            AuthServiceError::EmailTaken => write!(f, "An account with this email already exists."),
            AuthServiceError::InvalidUsername => write!(
                f,
                "Username must be 3-32 characters and contain only letters, numbers, or underscores."
            ),
            AuthServiceError::InvalidCredentials => write!(f, "Invalid email or password."),
            AuthServiceError::Internal => write!(f, "Authentication failed"),
            AuthServiceError::Storage => write!(f, "Database error"),
        }
    }
}
