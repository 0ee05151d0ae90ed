//! Command dispatch onto core services.

use crate::args::{
    ChickenArgs, ChickenCommand, CollectionCommand, Commands, EmployeeArgs, EmployeeCommand,
    PriceCommand, RangeArgs, ReportCommand,
};
use crate::CliError;
use henhouse_core::{
    ChickenFields, ChickenService, DateRange, EggCollectionFields, EggCollectionService,
    EmployeeFields, EmployeeService, PricingService, ReportService, ServiceError,
    SqliteChickenRepository, SqliteEggCollectionRepository, SqliteEmployeeRepository,
    SqliteSettingsRepository,
};
use rusqlite::Connection;
use serde::Serialize;
use serde_json::{json, Value};

pub fn dispatch(conn: &Connection, command: Commands) -> Result<Value, CliError> {
    match command {
        Commands::Chicken(command) => chicken(conn, command),
        Commands::Employee(command) => employee(conn, command),
        Commands::Collection(command) => collection(conn, command),
        Commands::Price(command) => price(conn, command),
        Commands::Report(command) => report(conn, command),
    }
}

fn chicken(conn: &Connection, command: ChickenCommand) -> Result<Value, CliError> {
    let service = ChickenService::new(SqliteChickenRepository::new(conn));
    match command {
        ChickenCommand::List => encode(service.list_chickens()?),
        ChickenCommand::Get { id } => encode(service.get_chicken(id)?),
        ChickenCommand::Add(args) => encode(service.create_chicken(chicken_fields(args))?),
        ChickenCommand::Update { id, fields } => {
            encode(service.update_chicken(id, chicken_fields(fields))?)
        }
        ChickenCommand::Delete { id } => {
            service.delete_chicken(id)?;
            Ok(json!({ "deleted": id }))
        }
    }
}

fn chicken_fields(args: ChickenArgs) -> ChickenFields {
    ChickenFields {
        cage_id: args.cage,
        weight: args.weight,
        age: args.age,
        egg_per_month: args.eggs,
        breed: args.breed,
    }
}

fn employee(conn: &Connection, command: EmployeeCommand) -> Result<Value, CliError> {
    let service = EmployeeService::new(SqliteEmployeeRepository::new(conn));
    match command {
        EmployeeCommand::List => encode(service.list_employees()?),
        EmployeeCommand::Get { id } => encode(service.get_employee(id)?),
        EmployeeCommand::Add(args) => encode(service.create_employee(employee_fields(args))?),
        EmployeeCommand::Update { id, fields } => {
            encode(service.update_employee(id, employee_fields(fields))?)
        }
        EmployeeCommand::Delete { id } => {
            service.delete_employee(id)?;
            Ok(json!({ "deleted": id }))
        }
    }
}

fn employee_fields(args: EmployeeArgs) -> EmployeeFields {
    EmployeeFields {
        full_name: args.name,
        passport_data: args.passport,
        salary: args.salary,
        cages: args.cages,
    }
}

fn collection(conn: &Connection, command: CollectionCommand) -> Result<Value, CliError> {
    let service = EggCollectionService::new(
        SqliteEggCollectionRepository::new(conn),
        SqliteChickenRepository::new(conn),
        SqliteEmployeeRepository::new(conn),
    );
    match command {
        CollectionCommand::Record {
            date,
            cage,
            eggs,
            chicken,
            employee,
        } => encode(service.record_collection(EggCollectionFields {
            collected_on: date,
            cage_id: cage,
            chicken_id: chicken,
            employee_id: employee,
            egg_count: eggs,
        })?),
        CollectionCommand::List(range) => encode(service.list_collections(&date_range(range)?)?),
        CollectionCommand::Delete { id } => {
            service.delete_collection(id)?;
            Ok(json!({ "deleted": id }))
        }
    }
}

fn price(conn: &Connection, command: PriceCommand) -> Result<Value, CliError> {
    let service = PricingService::new(SqliteSettingsRepository::new(conn));
    if let PriceCommand::Set { price } = command {
        service.set_egg_price(price)?;
    }
    Ok(json!({ "egg_price": service.egg_price()? }))
}

fn report(conn: &Connection, command: ReportCommand) -> Result<Value, CliError> {
    let service = ReportService::new(
        SqliteChickenRepository::new(conn),
        SqliteEmployeeRepository::new(conn),
        SqliteEggCollectionRepository::new(conn),
        SqliteSettingsRepository::new(conn),
    );
    match command {
        ReportCommand::EggStats(range) => encode(service.egg_stats(&date_range(range)?)?),
        ReportCommand::EmployeeEggs(range) => {
            encode(service.employee_egg_stats(&date_range(range)?)?)
        }
        ReportCommand::EmployeeEggsOf { id, range } => {
            encode(service.employee_egg_count(id, &date_range(range)?)?)
        }
        ReportCommand::MostProductive => encode(service.most_productive_chicken()?),
        ReportCommand::LowProductivity => encode(service.low_productivity_chickens()?),
        ReportCommand::Workloads => encode(service.employee_chicken_counts()?),
        ReportCommand::EmployeeWorkload { id } => encode(service.employee_chicken_count(id)?),
        ReportCommand::Summary => encode(service.productivity_summary()?),
        ReportCommand::BusiestCage(range) => encode(service.busiest_cage(&date_range(range)?)?),
        ReportCommand::Average { weight, age } => Ok(json!({
            "weight": weight,
            "age": age,
            "average_egg_production": service.average_eggs_for(weight, age)?,
        })),
    }
}

fn date_range(args: RangeArgs) -> Result<DateRange, CliError> {
    DateRange::new(args.from, args.to).map_err(|err| CliError::from(ServiceError::from(err)))
}

fn encode<T: Serialize>(value: T) -> Result<Value, CliError> {
    Ok(serde_json::to_value(value)?)
}
