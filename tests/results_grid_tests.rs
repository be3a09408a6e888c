#[cfg(test)]
mod results_grid_tests {
    use chrono::NaiveDate;
    use hotelql::core::db::ExecutionGateway;
    use hotelql::core::HotelError;
    use hotelql::results_grid::TabularRenderer;
    use hotelql::statements::mutations::{self, NewRoom};
    use hotelql::statements::reports::{self, CustomerName, DateRange};
    use hotelql::test_utils::DatabaseFixture;

    fn january() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 31).unwrap(),
        )
        .unwrap()
    }

    fn render(fixture: &DatabaseFixture, statement: &hotelql::statements::Statement) -> (usize, String) {
        let gateway = ExecutionGateway::new(&fixture.connection);
        let mut renderer = TabularRenderer::new(Vec::new());
        let count = gateway.execute_query(statement, &mut renderer).unwrap();
        assert_eq!(renderer.row_count(), count);
        (count, String::from_utf8(renderer.into_inner()).unwrap())
    }

    #[test]
    fn test_ranked_report_streams_in_order() {
        let fixture = DatabaseFixture::with_sample_data().unwrap();
        let (count, output) = render(&fixture, &reports::top_k_price_by_date_range(january(), 3));

        assert_eq!(count, 3);
        assert_eq!(
            output,
            "bID\thotelID\troomNo\tbookingDate\tprice\n\
             3\t2\t201\t2020-01-10\t300.00\n\
             5\t2\t202\t2020-01-25\t300.00\n\
             1\t1\t101\t2020-01-05\t250.00\n"
        );
    }

    #[test]
    fn test_empty_report_renders_nothing() {
        let fixture = DatabaseFixture::with_sample_data().unwrap();
        let (count, output) = render(&fixture, &reports::available_rooms(2));
        assert_eq!(count, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_aggregate_over_no_rows_is_zero() {
        let fixture = DatabaseFixture::with_sample_data().unwrap();
        let nobody = CustomerName {
            first: "Nobody".to_string(),
            last: "Here".to_string(),
        };
        let (count, output) = render(&fixture, &reports::total_cost_for_customer(1, &nobody, january()));
        assert_eq!(count, 1);
        assert_eq!(output, "totalCost\n0.00\n");
    }

    #[test]
    fn test_collect_reads_columns_by_name() {
        let fixture = DatabaseFixture::with_sample_data().unwrap();
        let gateway = ExecutionGateway::new(&fixture.connection);
        let result = gateway.collect(&reports::repairs_by_company("Acme Repairs")).unwrap();
        assert_eq!(result.row_count, 1);
        assert_eq!(result.column("repairType"), Some(vec!["Electric"]));
    }

    #[test]
    fn test_mutation_rejected_as_report() {
        let fixture = DatabaseFixture::new().unwrap();
        let gateway = ExecutionGateway::new(&fixture.connection);
        let statement = mutations::insert_room(&NewRoom {
            hotel_id: 1,
            room_no: 101,
            room_type: "Suite".to_string(),
        });

        let mut renderer = TabularRenderer::new(Vec::new());
        match gateway.execute_query(&statement, &mut renderer) {
            Err(HotelError::Query(message)) => assert!(message.contains("insert-room")),
            other => panic!("Expected Query error, got {:?}", other),
        }
        assert!(renderer.into_inner().is_empty());
        assert_eq!(fixture.count("Room").unwrap(), 0);
    }
}
