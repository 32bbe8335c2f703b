use anyhow::Result;
use chrono::NaiveDate;
use hotel_store::{HotelStore, NewReservation, Reservation};

#[derive(Debug, clap::Args)]
pub(crate) struct Fields {
    /// Room number to book
    #[arg(long)]
    pub room: i32,

    /// Id of the client making the booking
    #[arg(long)]
    pub client: i32,

    /// Check-in date, YYYY-MM-DD
    #[arg(long)]
    pub date_in: NaiveDate,

    /// Check-out date, YYYY-MM-DD
    #[arg(long)]
    pub date_out: NaiveDate,
}

impl From<&Fields> for NewReservation {
    fn from(f: &Fields) -> Self {
        NewReservation::new(f.room, f.client, f.date_in, f.date_out)
    }
}

pub(crate) fn list(store: &HotelStore) -> Result<()> {
    print!("{}", render_table(&store.reservations().list_all()?));
    Ok(())
}

pub(crate) fn show(store: &HotelStore, id: i32) -> Result<()> {
    print!("{}", render_table(&[store.reservations().get(id)?]));
    Ok(())
}

pub(crate) fn add(store: &HotelStore, fields: &Fields) -> Result<()> {
    let reservation = store.reservations().create(&fields.into())?;
    println!("made reservation {}", reservation.id);
    Ok(())
}

pub(crate) fn edit(store: &HotelStore, id: i32, fields: &Fields) -> Result<()> {
    store.reservations().update(id, &fields.into())?;
    println!("updated reservation {id}");
    Ok(())
}

pub(crate) fn remove(store: &HotelStore, id: i32) -> Result<()> {
    store.reservations().delete(id)?;
    println!("removed reservation {id}");
    Ok(())
}

fn render_table(rows: &[Reservation]) -> String {
    let header = format!(
        "{:>6}  {:>6}  {:>6}  {:<10}  {:<10}\n",
        "ID", "Room", "Client", "Date In", "Date Out"
    );
    let body = rows
        .iter()
        .map(|r| {
            format!(
                "{:>6}  {:>6}  {:>6}  {:<10}  {:<10}\n",
                r.id, r.room_number, r.client_id, r.date_in, r.date_out
            )
        })
        .collect::<String>();
    header + &body
}
