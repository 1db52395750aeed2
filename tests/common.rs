#![allow(dead_code)]

use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::sync::Once;
use workbench_inspect::reflect_gadget;
use workbench_inspect::schema::{EnumTable, FieldDescriptor, FieldKind, Reflected, Schema, Value};
use workbench_inspect::{NodeId, Tree};

static INIT: Once = Once::new();

pub fn setup() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("trace")
            .with_test_writer()
            .try_init();
    });
}

pub static STATUS: Lazy<EnumTable> =
    Lazy::new(|| EnumTable::new("Status").variant(0, "Ok").variant(1, "Error"));

pub struct Ticket {
    pub number: i64,
    pub seat: String,
    pub seat_is_set: bool,
}

static TICKET_SCHEMA: Lazy<Schema<Ticket>> = Lazy::new(|| {
    Schema::<Ticket>::builder("Ticket")
        .scalar("number", |t| Value::scalar(t.number.to_string()))
        .scalar("seat", |t| Value::scalar(t.seat.as_str()))
        .boolean("seatIsSet", |t| Value::Bool(t.seat_is_set))
        .build()
});
reflect_gadget!(Ticket, TICKET_SCHEMA);

pub fn ticket(seat_is_set: bool) -> Ticket {
    Ticket {
        number: 42,
        seat: "12A".to_string(),
        seat_is_set,
    }
}

pub struct Reply {
    pub status: i64,
}

static REPLY_SCHEMA: Lazy<Schema<Reply>> = Lazy::new(|| {
    Schema::<Reply>::builder("Reply")
        .enumeration("status", |r| Value::Enum(r.status, &*STATUS))
        .build()
});
reflect_gadget!(Reply, REPLY_SCHEMA);

pub struct Payload {
    pub data: Vec<u8>,
}

static PAYLOAD_SCHEMA: Lazy<Schema<Payload>> = Lazy::new(|| {
    Schema::<Payload>::builder("Payload")
        .bytes("data", |p| Value::bytes(&p.data))
        .build()
});
reflect_gadget!(Payload, PAYLOAD_SCHEMA);

pub struct Carriage {
    pub number: u32,
}

static CARRIAGE_SCHEMA: Lazy<Schema<Carriage>> = Lazy::new(|| {
    Schema::<Carriage>::builder("Carriage")
        .scalar("number", |c| c.number.to_value())
        .build()
});
reflect_gadget!(Carriage, CARRIAGE_SCHEMA);

pub struct Leg {
    pub from: String,
    pub to: String,
    pub carriage: Option<Carriage>,
}

static LEG_SCHEMA: Lazy<Schema<Leg>> = Lazy::new(|| {
    Schema::<Leg>::builder("Leg")
        .scalar("from", |l| l.from.to_value())
        .scalar("to", |l| l.to.to_value())
        .composite("carriage", |l| l.carriage.to_value())
        .build()
});
reflect_gadget!(Leg, LEG_SCHEMA);

pub fn leg(from: &str, to: &str, carriage: Option<u32>) -> Leg {
    Leg {
        from: from.to_string(),
        to: to.to_string(),
        carriage: carriage.map(|number| Carriage { number }),
    }
}

pub struct Trip {
    pub name: String,
    pub legs: Vec<Leg>,
    pub stops: Vec<String>,
}

static TRIP_SCHEMA: Lazy<Schema<Trip>> = Lazy::new(|| {
    Schema::<Trip>::builder("Trip")
        .scalar("name", |t| t.name.to_value())
        .sequence("legs", |t| t.legs.to_value())
        .sequence("stops", |t| t.stops.to_value())
        .build()
});
reflect_gadget!(Trip, TRIP_SCHEMA);

pub struct Matrix {
    pub rows: Vec<Vec<i64>>,
}

static MATRIX_SCHEMA: Lazy<Schema<Matrix>> = Lazy::new(|| {
    Schema::<Matrix>::builder("Matrix")
        .sequence("rows", |m| m.rows.to_value())
        .build()
});
reflect_gadget!(Matrix, MATRIX_SCHEMA);

pub struct Passenger {
    pub name: String,
    pub age: u32,
}

static PASSENGER_SCHEMA: Lazy<Schema<Passenger>> = Lazy::new(|| {
    Schema::<Passenger>::builder("Passenger")
        .scalar("name", |p| p.name.to_value())
        .scalar("age", |p| p.age.to_value())
        .build()
});
reflect_gadget!(Passenger, PASSENGER_SCHEMA);

pub struct Booking {
    pub passenger: Passenger,
    pub passenger_is_set: bool,
    pub note: String,
}

static BOOKING_SCHEMA: Lazy<Schema<Booking>> = Lazy::new(|| {
    Schema::<Booking>::builder("Booking")
        .composite("passenger", |b| Value::Composite(&b.passenger))
        .boolean("passengerIsSet", |b| Value::Bool(b.passenger_is_set))
        .scalar("note", |b| b.note.to_value())
        .build()
});
reflect_gadget!(Booking, BOOKING_SCHEMA);

pub fn booking(passenger_is_set: bool) -> Booking {
    Booking {
        passenger: Passenger {
            name: "Ada".to_string(),
            age: 36,
        },
        passenger_is_set,
        note: "window".to_string(),
    }
}

pub struct Header {
    pub version: i64,
    pub checksum: u32,
}

static HEADER_SCHEMA: Lazy<Schema<Header>> = Lazy::new(|| {
    Schema::<Header>::builder("Header")
        .scalar("version", |h| h.version.to_value())
        .field(
            FieldDescriptor::new("checksum", FieldKind::Scalar).computed(),
            |h| h.checksum.to_value(),
        )
        .build()
});
reflect_gadget!(Header, HEADER_SCHEMA);

/// Gate is optional through an explicit annotation; the flag is not adjacent.
pub struct Flight {
    pub gate: String,
    pub terminal: String,
    pub has_gate: bool,
}

static FLIGHT_SCHEMA: Lazy<Schema<Flight>> = Lazy::new(|| {
    Schema::<Flight>::builder("Flight")
        .field(
            FieldDescriptor::new("gate", FieldKind::Scalar).with_presence("hasGate"),
            |f| f.gate.to_value(),
        )
        .scalar("terminal", |f| f.terminal.to_value())
        .boolean("hasGate", |f| Value::Bool(f.has_gate))
        .build()
});
reflect_gadget!(Flight, FLIGHT_SCHEMA);

/// Presence flag declared boolean that reads back as text.
pub struct Account {
    pub credentials: String,
    pub credentials_is_set: String,
}

static ACCOUNT_SCHEMA: Lazy<Schema<Account>> = Lazy::new(|| {
    Schema::<Account>::builder("Account")
        .scalar("credentials", |a| a.credentials.to_value())
        .boolean("credentialsIsSet", |a| a.credentials_is_set.to_value())
        .build()
});
reflect_gadget!(Account, ACCOUNT_SCHEMA);

/// Self-referential composite.
pub struct Chain {
    pub id: i64,
    pub next: Option<Box<Chain>>,
}

static CHAIN_SCHEMA: Lazy<Schema<Chain>> = Lazy::new(|| {
    Schema::<Chain>::builder("Chain")
        .scalar("id", |c| c.id.to_value())
        .composite("next", |c| match &c.next {
            Some(next) => Value::Composite(&**next),
            None => Value::Absent(Cow::Borrowed("Chain")),
        })
        .build()
});
reflect_gadget!(Chain, CHAIN_SCHEMA);

pub fn chain(length: i64) -> Chain {
    (0..length - 1).rev().fold(
        Chain {
            id: length - 1,
            next: None,
        },
        |next, id| Chain {
            id,
            next: Some(Box::new(next)),
        },
    )
}

pub fn row(label: &str, value: &str, enabled: bool) -> (String, String, bool) {
    (label.to_string(), value.to_string(), enabled)
}

/// `(label, value, enabled)` of the direct children of `id`.
pub fn rows_of(tree: &Tree, id: NodeId) -> Vec<(String, String, bool)> {
    tree.children(id)
        .map(|node| (node.label.clone(), node.value.clone(), node.enabled))
        .collect()
}

pub fn top_rows(tree: &Tree) -> Vec<(String, String, bool)> {
    rows_of(tree, tree.root())
}
